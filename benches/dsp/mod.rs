//! Benchmarks for low-level DSP primitives.

mod biquad;
mod synth;

pub use biquad::bench_biquad;
pub use synth::bench_synth;
