use tracing::debug;

use crate::synth::poly::WavetableSynth;

/// Velocity the demo presses every chord tone with.
pub const DEMO_VELOCITY: u8 = 20;

pub const NUM_DEMO_CHORDS: usize = 8;
pub const NUM_DEMO_NOTES: usize = 7;

/// Eight voicings used when no MIDI controller is attached.
pub const DEMO_CHORDS: [[u8; NUM_DEMO_NOTES]; NUM_DEMO_CHORDS] = [
    [33, 45, 52, 57, 60, 64, 69], // Am
    [36, 43, 48, 55, 60, 64, 67], // C
    [40, 47, 52, 56, 59, 64, 68], // E
    [41, 48, 53, 57, 60, 65, 69], // F
    [43, 50, 55, 59, 62, 67, 71], // G
    [41, 50, 57, 60, 65, 69, 72], // Dm/F
    [43, 50, 57, 62, 65, 69, 72], // G9sus
    [36, 48, 55, 60, 67, 72, 76], // C
];

/// Steps through [`DEMO_CHORDS`], one chord sounding at a time.
#[derive(Debug, Default)]
pub struct DemoChords {
    current: usize,
}

impl DemoChords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn play(&self, synth: &mut WavetableSynth) {
        for &note in &DEMO_CHORDS[self.current] {
            synth.press_key(note as usize, DEMO_VELOCITY);
        }
    }

    /// Release the sounding chord, move to the next one (wrapping) and press it.
    pub fn advance(&mut self, synth: &mut WavetableSynth) {
        for &note in &DEMO_CHORDS[self.current] {
            synth.release_key(note as usize);
        }
        self.current = (self.current + 1) % NUM_DEMO_CHORDS;
        debug!(chord = self.current, "demo chord");
        self.play(synth);
    }
}
