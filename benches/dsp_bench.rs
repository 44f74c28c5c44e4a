//! Benchmarks for DSP primitives and the full frame pipeline.
//!
//! Run with: cargo bench
//!
//! The engine processes one frame per transmit interrupt, so every frame has
//! to finish inside one sample period. At 46.88 kHz that is about 21.3µs.
//! Blocks below are sequences of single-frame calls, not batched renders:
//!   - 64 frames  = 1.37ms of audio
//!   - 512 frames = 10.92ms of audio
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (biquad, filter banks, wavetable synth)
//!   - scenarios/*  Whole frames through the engine and controller

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Frames per measured iteration.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_biquad,
    dsp::bench_synth,
    // Real-world scenarios
    scenarios::bench_frame,
);
criterion_main!(benches);
