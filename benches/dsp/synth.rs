//! Benchmarks for the wavetable synth.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use saavy_vox::dsp::wavetable::Wavetable;
use saavy_vox::synth::{demo::DEMO_CHORDS, WavetableSynth, MAX_VOICES};
use saavy_vox::{SynthConfig, AUDIO_FRAME_HZ};

use crate::BLOCK_SIZES;

pub fn bench_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/synth");
    let table = Arc::new(Wavetable::saw());

    for &size in BLOCK_SIZES {
        // Typical chord
        let mut synth = WavetableSynth::new(&SynthConfig::default(), AUDIO_FRAME_HZ, Arc::clone(&table));
        for &note in &DEMO_CHORDS[0] {
            synth.press_key(note as usize, 100);
        }
        group.bench_with_input(BenchmarkId::new("chord", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..size {
                    black_box(synth.render_sample());
                }
            })
        });

        // Worst case: every voice held
        let mut synth = WavetableSynth::new(&SynthConfig::default(), AUDIO_FRAME_HZ, Arc::clone(&table));
        for key in 0..MAX_VOICES {
            synth.press_key(key, 127);
        }
        group.bench_with_input(BenchmarkId::new("all_voices", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..size {
                    black_box(synth.render_sample());
                }
            })
        });
    }

    group.finish();
}
