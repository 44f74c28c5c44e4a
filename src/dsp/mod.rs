//! Low-level DSP primitives used by the synth and the vocoder.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! making them safe to embed directly inside the engine. They stay focused on
//! the signal-processing math; sequencing and scheduling live in
//! [`crate::vocoder`] and [`crate::engine`].

/// Second-order IIR filter: coefficient derivation and per-instance state.
pub mod biquad;
/// Single-cycle waveform tables and the bank the function button cycles.
pub mod wavetable;

pub use biquad::{Biquad, BiquadCoeffs, FilterKind};
pub use wavetable::{WaveShape, Wavetable, WavetableBank, TABLE_LEN};
