//! Benchmarks for whole frames: engine alone, and through the handoff.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use saavy_vox::engine::{button::ButtonInput, exchange::FrameExchange, transport::AudioTransport};
use saavy_vox::io::MidiEvent;
use saavy_vox::synth::demo::DEMO_CHORDS;
use saavy_vox::{Engine, EngineConfig, FrameController, AUDIO_FRAME_HZ, FRAME_WORDS};

use crate::BLOCK_SIZES;

struct Sine {
    n: usize,
}

impl AudioTransport for Sine {
    fn pull_input_frame(&mut self) -> [i32; FRAME_WORDS] {
        self.n += 1;
        [0, voice(self.n)]
    }

    fn push_output_frame(&mut self, frame: [i32; FRAME_WORDS]) {
        black_box(frame);
    }
}

fn voice(n: usize) -> i32 {
    (1_000_000.0 * (std::f32::consts::TAU * 440.0 * n as f32 / AUDIO_FRAME_HZ).sin()) as i32
}

pub fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/frame");
    let config = EngineConfig::default();

    for &size in BLOCK_SIZES {
        let input: Vec<i32> = (0..size).map(voice).collect();

        // === ENGINE ===
        // Seven-note chord under a sung tone; covers all six schedule slots
        let mut engine = Engine::new(&config);
        for &note in &DEMO_CHORDS[0] {
            engine.handle_midi(MidiEvent::from_bytes(0x90, note, 100));
        }
        group.bench_with_input(BenchmarkId::new("engine", size), &size, |b, _| {
            b.iter(|| {
                for &x in &input {
                    black_box(engine.process_frame(black_box([0, x])));
                }
            })
        });

        // === HANDOFF ===
        // Interrupt + controller poll per frame; adds the guarded copies
        let exchange = Arc::new(FrameExchange::new());
        let mut controller = FrameController::new(
            &EngineConfig {
                demo_mode: true,
                ..config.clone()
            },
            Arc::clone(&exchange),
            Arc::new(ButtonInput::default()),
        );
        let mut transport = Sine { n: 0 };
        let mut midi: Option<MidiEvent> = None;
        group.bench_with_input(BenchmarkId::new("handoff", size), &size, |b, _| {
            b.iter(|| {
                for _ in 0..size {
                    exchange.on_transmit_request(&mut transport);
                    black_box(controller.poll(&mut midi));
                }
            })
        });
    }

    group.finish();
}
