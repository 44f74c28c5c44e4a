use std::sync::Arc;

use crate::{
    config::SynthConfig,
    dsp::wavetable::Wavetable,
    synth::{message::SynthMessage, voice::Voice},
    MAX_AUDIO_LEVEL, MIN_AUDIO_LEVEL,
};

/// Size of the voice pool: one slot per MIDI note number.
pub const MAX_VOICES: usize = 128;

/// Centre of the 14-bit pitch-bend range.
pub const PITCH_BEND_CENTER: u16 = 8192;

/// Polyphonic wavetable generator.
///
/// Voices are an array indexed directly by note number. There is no
/// allocation and no voice stealing: pressing a key that is already sounding
/// just updates its velocity.
pub struct WavetableSynth {
    voices: [Voice; MAX_VOICES],
    voice_count: usize,
    pitch_bend: f32,
    bend_semitones: f32,
    midi_channel: u8,
    sample_rate: f32,
    wavetable: Arc<Wavetable>,
}

impl WavetableSynth {
    /// Build and initialise a synth from its config.
    ///
    /// # Panics
    ///
    /// Panics if the reference index is outside the voice pool or the pool
    /// is larger than [`MAX_VOICES`].
    pub fn new(config: &SynthConfig, sample_rate: f32, wavetable: Arc<Wavetable>) -> Self {
        let mut synth = Self {
            voices: [Voice::default(); MAX_VOICES],
            voice_count: 0,
            pitch_bend: 1.0,
            bend_semitones: config.pitch_bend_semitones,
            midi_channel: 0,
            sample_rate,
            wavetable,
        };
        synth.initialize(
            config.voice_count,
            config.reference_index,
            config.reference_hz,
            config.midi_channel,
        );
        synth
    }

    /// Retune every voice in equal temperament around a reference note,
    /// silence and rewind them, and reset the pitch bend.
    ///
    /// # Panics
    ///
    /// Panics if `reference_index >= voice_count` or
    /// `voice_count > MAX_VOICES`.
    pub fn initialize(
        &mut self,
        voice_count: usize,
        reference_index: usize,
        reference_hz: f32,
        midi_channel: u8,
    ) {
        assert!(
            voice_count <= MAX_VOICES,
            "voice count {voice_count} exceeds pool of {MAX_VOICES}"
        );
        assert!(
            reference_index < voice_count,
            "reference index {reference_index} outside voice pool of {voice_count}"
        );

        for (index, voice) in self.voices.iter_mut().enumerate() {
            *voice = if index < voice_count {
                let semitones = index as f32 - reference_index as f32;
                let frequency = reference_hz * 2.0_f32.powf(semitones / 12.0);
                Voice::tuned(frequency, self.sample_rate)
            } else {
                Voice::default()
            };
        }

        self.voice_count = voice_count;
        self.midi_channel = midi_channel;
        self.pitch_bend = 1.0;
    }

    /// Set a key's velocity (clamped to 127). Out-of-range keys are ignored.
    pub fn press_key(&mut self, index: usize, velocity: u8) {
        if let Some(voice) = self.voices[..self.voice_count].get_mut(index) {
            voice.press(velocity);
        }
    }

    /// Silence a key, keeping its phase. Out-of-range keys are ignored.
    pub fn release_key(&mut self, index: usize) {
        if let Some(voice) = self.voices[..self.voice_count].get_mut(index) {
            voice.release();
        }
    }

    pub fn all_notes_off(&mut self) {
        self.voices.iter_mut().for_each(Voice::release);
    }

    /// Apply a 14-bit pitch-bend message to every voice.
    ///
    /// The value is normalised to -1.0..1.0 around 8192 and mapped onto
    /// ±`bend_semitones`.
    pub fn update_pitch_bend(&mut self, lsb: u8, msb: u8) {
        let value = (u16::from(msb & 0x7F) << 7) | u16::from(lsb & 0x7F);
        let normalized = value as f32 / PITCH_BEND_CENTER as f32 - 1.0;
        self.pitch_bend = 2.0_f32.powf(normalized * self.bend_semitones / 12.0);
    }

    pub fn handle_message(&mut self, message: SynthMessage) {
        match message {
            SynthMessage::NoteOn { note, velocity } => self.press_key(note as usize, velocity),
            SynthMessage::NoteOff { note, .. } => self.release_key(note as usize),
            SynthMessage::PitchBend { lsb, msb } => self.update_pitch_bend(lsb, msb),
            SynthMessage::AllNotesOff => self.all_notes_off(),
        }
    }

    /// Mix every sounding voice into one sample and advance their phases.
    ///
    /// The running sum is hard-clamped to ±[`MAX_AUDIO_LEVEL`] after each
    /// voice is added.
    pub fn render_sample(&mut self) -> i32 {
        let table = &*self.wavetable;
        let bend = self.pitch_bend;
        let mut out: i32 = 0;

        for voice in self.voices[..self.voice_count]
            .iter_mut()
            .filter(|v| v.is_active())
        {
            out = out
                .saturating_add(voice.sample(table) as i32)
                .clamp(MIN_AUDIO_LEVEL, MAX_AUDIO_LEVEL);
            voice.advance(bend);
        }

        out
    }

    /// Swap the active waveform. Takes effect from the next rendered sample.
    pub fn set_wavetable(&mut self, wavetable: Arc<Wavetable>) {
        self.wavetable = wavetable;
    }

    pub fn wavetable(&self) -> &Arc<Wavetable> {
        &self.wavetable
    }

    pub fn voice(&self, index: usize) -> Option<&Voice> {
        self.voices[..self.voice_count].get(index)
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn pitch_bend(&self) -> f32 {
        self.pitch_bend
    }

    pub fn midi_channel(&self) -> u8 {
        self.midi_channel
    }

    pub fn voice_count(&self) -> usize {
        self.voice_count
    }
}
