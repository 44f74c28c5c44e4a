// Purpose: Voice pool, MIDI-facing messages, demo chords
// This layer sits below the vocoder and produces the carrier signal

pub mod demo;
pub mod message;
pub mod poly;
pub mod voice;

pub use poly::{WavetableSynth, MAX_VOICES};
