//! Benchmarks for biquads and the 18-band filter banks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_vox::dsp::biquad::{Biquad, BiquadCoeffs};
use saavy_vox::vocoder::bands::{FilterBank, NUM_BANDS};
use saavy_vox::AUDIO_FRAME_HZ;

use crate::BLOCK_SIZES;

pub fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/biquad");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp in 24-bit units
        let input: Vec<f32> = (0..size)
            .map(|i| ((i as f32 / size as f32) * 2.0 - 1.0) * 1_000_000.0)
            .collect();

        // Single lowpass, as used for antialiasing
        let mut filter = Biquad::lowpass(3400.0, AUDIO_FRAME_HZ, 0.9);
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    black_box(filter.run(black_box(x)));
                }
            })
        });

        // Shaping bank: one input fanned out to every band
        let mut bank = FilterBank::bandpass(AUDIO_FRAME_HZ, 0.2);
        group.bench_with_input(BenchmarkId::new("bank_shared", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    bank.run_shared(black_box(x));
                }
                black_box(bank.output(0));
            })
        });

        // Envelope bank: a separate input per band
        let coeffs = BiquadCoeffs::lowpass(100.0, AUDIO_FRAME_HZ / 6.0, 0.9);
        let mut bank = FilterBank::uniform(coeffs);
        group.bench_with_input(BenchmarkId::new("bank_per_band", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    bank.run_per_band(black_box(&[x.abs(); NUM_BANDS]));
                }
                black_box(bank.output(0));
            })
        });
    }

    group.finish();
}
