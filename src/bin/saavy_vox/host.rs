//! Audio devices standing in for the codec and its transmit interrupt.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, RingBuffer};
use tracing::{error, info, warn};

use saavy_vox::{
    engine::{button::ButtonInput, exchange::FrameExchange, transport::AudioTransport},
    io::{
        converter::{f32_to_s24, s24_to_f32},
        MidiEvent,
    },
    EngineConfig, FrameController, FRAME_WORDS,
};

use super::controls;

/// Mic samples buffered between the input and output callbacks.
const MIC_RING_CAPACITY: usize = 8192;
const MIDI_RING_CAPACITY: usize = 256;

/// Transport backed by the mic ring. The voice goes on the right input
/// channel, where the codec delivers it.
struct HostTransport {
    mic: Consumer<i32>,
    last_mic: i32,
    outgoing: [i32; FRAME_WORDS],
}

impl AudioTransport for HostTransport {
    fn pull_input_frame(&mut self) -> [i32; FRAME_WORDS] {
        // Hold the last sample when the input device runs behind.
        if let Ok(sample) = self.mic.pop() {
            self.last_mic = sample;
        }
        [0, self.last_mic]
    }

    fn push_output_frame(&mut self, frame: [i32; FRAME_WORDS]) {
        self.outgoing = frame;
    }
}

pub fn run(config: EngineConfig) -> EyreResult<()> {
    let host = cpal::default_host();
    let output = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let input = host
        .default_input_device()
        .ok_or_else(|| eyre!("no default input device available"))?;
    let output_config = output
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    let input_config = input
        .default_input_config()
        .wrap_err("failed to fetch default input config")?;

    let sample_rate = output_config.sample_rate().0 as f32;
    let out_channels = output_config.channels() as usize;
    let in_channels = input_config.channels() as usize;
    if input_config.sample_rate() != output_config.sample_rate() {
        warn!(
            input_hz = input_config.sample_rate().0,
            output_hz = output_config.sample_rate().0,
            "input and output rates differ; the voice will drift"
        );
    }

    let config = config.with_sample_rate(sample_rate);
    config.validate().wrap_err("invalid engine config")?;
    info!(sample_rate, out_channels, in_channels, "audio devices ready");

    let exchange = Arc::new(FrameExchange::new());
    let button = Arc::new(ButtonInput::default());
    let mut controller = FrameController::new(&config, Arc::clone(&exchange), Arc::clone(&button));

    let (mut mic_tx, mic_rx) = RingBuffer::<i32>::new(MIC_RING_CAPACITY);
    let (midi_tx, mut midi_rx) = RingBuffer::<MidiEvent>::new(MIDI_RING_CAPACITY);

    let input_stream = input.build_input_stream(
        &input_config.into(),
        move |data: &[f32], _| {
            for frame in data.chunks(in_channels) {
                // A full ring means the output side stalled; drop the sample.
                let _ = mic_tx.push(f32_to_s24(frame[0]));
            }
        },
        |err| error!(%err, "input stream error"),
        None,
    )?;

    let mut transport = HostTransport {
        mic: mic_rx,
        last_mic: 0,
        outgoing: [0; FRAME_WORDS],
    };
    let irq_exchange = Arc::clone(&exchange);
    let output_stream = output.build_output_stream(
        &output_config.into(),
        move |data: &mut [f32], _| {
            for frame in data.chunks_mut(out_channels) {
                irq_exchange.on_transmit_request(&mut transport);
                for (ch, sample) in frame.iter_mut().enumerate() {
                    *sample = s24_to_f32(transport.outgoing[ch.min(FRAME_WORDS - 1)]);
                }
                controller.poll(&mut midi_rx);
            }
        },
        |err| error!(%err, "output stream error"),
        None,
    )?;

    input_stream.play()?;
    output_stream.play()?;

    let stop = Arc::new(AtomicBool::new(false));
    let held = Arc::new(AtomicBool::new(false));
    let mut threads = vec![controls::spawn_button_timer(
        Arc::clone(&button),
        Arc::clone(&held),
        Arc::clone(&stop),
    )];
    if !config.demo_mode {
        threads.push(controls::spawn_arpeggiator(
            midi_tx,
            config.synth.midi_channel,
            Arc::clone(&stop),
        ));
    }

    println!("Playing... Enter = function button, q + Enter = quit");
    controls::read_stdin(&held)?;

    stop.store(true, Ordering::Relaxed);
    for thread in threads {
        if thread.join().is_err() {
            warn!("control thread panicked");
        }
    }
    info!(overruns = exchange.overruns(), "audio stopped");
    Ok(())
}
