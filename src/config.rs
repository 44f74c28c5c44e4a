//! Engine configuration.
//!
//! Defaults reproduce the tuned constants of the vocoder board. Everything
//! here is read once at construction; nothing is reconfigured on the audio
//! path.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    dsp::wavetable::WaveShape,
    synth::poly::MAX_VOICES,
    vocoder::{bands::BAND_CENTERS_HZ, schedule::DOWNSAMPLE_RATE},
    AUDIO_FRAME_HZ,
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),
    #[error("voice count {count} exceeds the pool of {max}")]
    TooManyVoices { count: usize, max: usize },
    #[error("reference index {index} is outside the voice pool of {voice_count}")]
    ReferenceOutOfRange { index: usize, voice_count: usize },
    #[error("reference frequency must be positive, got {0} Hz")]
    InvalidReference(f32),
    #[error("MIDI channel {0} is outside 0..=15")]
    InvalidChannel(u8),
    #[error("{name} at {hz} Hz is at or above the Nyquist frequency of {nyquist} Hz")]
    AboveNyquist {
        name: &'static str,
        hz: f32,
        nyquist: f32,
    },
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    pub voice_count: usize,
    /// Voice index the reference frequency is pinned to.
    pub reference_index: usize,
    pub reference_hz: f32,
    /// Zero-based channel the synth listens on.
    pub midi_channel: u8,
    /// Bend range in semitones, each direction.
    pub pitch_bend_semitones: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            voice_count: MAX_VOICES,
            reference_index: 57, // A3
            reference_hz: 220.0,
            midi_channel: 0,
            pitch_bend_semitones: 2.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct VocoderConfig {
    /// Antialiasing low-pass applied to the voice before analysis.
    pub antialias_hz: f32,
    pub antialias_q: f32,
    /// High-pass bypass that carries unvoiced consonants straight to the output.
    pub sibilance_hz: f32,
    pub sibilance_q: f32,
    /// Gain on the sibilance bypass relative to the vocoded sum.
    pub sibilance_gain: f32,
    /// Envelope follower low-pass, evaluated at the decimated rate.
    pub envelope_hz: f32,
    pub envelope_q: f32,
    /// Analysis band-pass width in octaves (decimated rate).
    pub analysis_bandwidth: f32,
    /// Shaping band-pass width in octaves (full rate).
    pub shaping_bandwidth: f32,
    /// Brings `carrier × envelope` back into the range of the dry signal.
    pub modulation_scale: f32,
}

impl Default for VocoderConfig {
    fn default() -> Self {
        Self {
            antialias_hz: 3400.0,
            antialias_q: 0.9,
            sibilance_hz: 3500.0,
            sibilance_q: 0.9,
            sibilance_gain: 1.0,
            envelope_hz: 100.0,
            envelope_q: 0.9,
            analysis_bandwidth: 0.1,
            shaping_bandwidth: 0.2,
            modulation_scale: 0.000_05,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Frame rate of the audio clock driving the engine.
    pub sample_rate: f32,
    pub synth: SynthConfig,
    pub vocoder: VocoderConfig,
    /// Ignore MIDI and play the built-in chords; the button cycles chords.
    pub demo_mode: bool,
    pub initial_waveform: WaveShape,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: AUDIO_FRAME_HZ,
            synth: SynthConfig::default(),
            vocoder: VocoderConfig::default(),
            demo_mode: false,
            initial_waveform: WaveShape::Saw,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn decimated_rate(&self) -> f32 {
        self.sample_rate / DOWNSAMPLE_RATE as f32
    }

    /// Check everything the engine cannot recover from at run time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }

        let synth = &self.synth;
        if synth.voice_count > MAX_VOICES {
            return Err(ConfigError::TooManyVoices {
                count: synth.voice_count,
                max: MAX_VOICES,
            });
        }
        if synth.reference_index >= synth.voice_count {
            return Err(ConfigError::ReferenceOutOfRange {
                index: synth.reference_index,
                voice_count: synth.voice_count,
            });
        }
        if synth.reference_hz.is_nan() || synth.reference_hz <= 0.0 {
            return Err(ConfigError::InvalidReference(synth.reference_hz));
        }
        if synth.midi_channel > 15 {
            return Err(ConfigError::InvalidChannel(synth.midi_channel));
        }

        let nyquist = self.sample_rate / 2.0;
        let decimated_nyquist = self.decimated_rate() / 2.0;
        let vocoder = &self.vocoder;
        let highest_band = BAND_CENTERS_HZ[0];

        let checks = [
            ("antialias cutoff", vocoder.antialias_hz, nyquist),
            ("sibilance cutoff", vocoder.sibilance_hz, nyquist),
            ("envelope cutoff", vocoder.envelope_hz, decimated_nyquist),
            ("highest band centre", highest_band, decimated_nyquist),
        ];
        for (name, hz, nyquist) in checks {
            if hz >= nyquist {
                return Err(ConfigError::AboveNyquist { name, hz, nyquist });
            }
        }

        Ok(())
    }
}
