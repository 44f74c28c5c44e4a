use crate::dsp::wavetable::{Wavetable, TABLE_LEN};

/// Highest velocity a key can hold. Velocity 0 means the voice is silent.
pub const MAX_VELOCITY: u8 = 127;

/// One note slot of the synth, permanently bound to a MIDI note number.
///
/// Releasing a key only zeroes the velocity; the phase keeps its value so a
/// retrigger continues where the note stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Voice {
    frequency: f32,
    phase: f32,           // table-index units, 0.0..TABLE_LEN
    phase_increment: f32, // table-index units per frame at zero bend
    velocity: u8,
}

impl Voice {
    /// A silent voice tuned to `frequency` at `sample_rate`.
    pub fn tuned(frequency: f32, sample_rate: f32) -> Self {
        Self {
            frequency,
            phase: 0.0,
            phase_increment: TABLE_LEN as f32 * frequency / sample_rate,
            velocity: 0,
        }
    }

    pub fn press(&mut self, velocity: u8) {
        self.velocity = velocity.min(MAX_VELOCITY);
    }

    pub fn release(&mut self) {
        self.velocity = 0;
    }

    pub fn is_active(&self) -> bool {
        self.velocity != 0
    }

    /// Linearly interpolated table value at the current phase, scaled by
    /// `velocity / 127`.
    #[inline]
    pub fn sample(&self, table: &Wavetable) -> f32 {
        let start = self.phase as usize;
        let frac = self.phase - start as f32;
        let gain = self.velocity as f32 / MAX_VELOCITY as f32;

        let begin = table.get(start) as f32 * gain;
        let end = table.get(start + 1) as f32 * gain;
        begin + frac * (end - begin)
    }

    /// Move the phase forward one frame, wrapping at the table length.
    #[inline]
    pub fn advance(&mut self, bend: f32) {
        self.phase += self.phase_increment * bend;
        while self.phase >= TABLE_LEN as f32 {
            self.phase -= TABLE_LEN as f32;
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn phase_increment(&self) -> f32 {
        self.phase_increment
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }
}
