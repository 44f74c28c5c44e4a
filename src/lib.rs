pub mod config;
pub mod dsp;
pub mod engine; // Frame clock, interrupt handoff, main-loop controller
pub mod io;
pub mod synth; // Voice pool, MIDI messages, demo chords
pub mod vocoder; // Analysis/envelope/shaping band pipeline

pub use config::{ConfigError, EngineConfig, SynthConfig, VocoderConfig};
pub use engine::{controller::FrameController, Engine};

/// Frame rate measured on the codec's LRCK line. The codec is configured for
/// 48 kHz but the clock tree delivers this.
pub const AUDIO_FRAME_HZ: f32 = 46_880.0;

/// Samples per frame exchanged with the audio transport (left, right).
pub const FRAME_WORDS: usize = 2;

/// Largest value a synth sum may reach. Full scale for 24 bits is 8_388_607;
/// this stays well short of it to protect the listener.
pub const MAX_AUDIO_LEVEL: i32 = 3_000_000;
pub const MIN_AUDIO_LEVEL: i32 = -3_000_000;
