use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::debug;

use crate::{
    config::EngineConfig,
    engine::{button::ButtonInput, exchange::FrameExchange, Engine},
    io::midi::MidiReceiver,
};

/// Overruns are reported at most once per this many seconds of processed frames.
const OVERRUN_REPORT_SECONDS: f32 = 1.0;

/// What a single [`FrameController::poll`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollOutcome {
    pub frame_processed: bool,
    pub midi_routed: bool,
    pub button_fired: bool,
}

/// The main loop. Polls the frame flag, the MIDI source and the button, and
/// runs the engine on whatever is pending.
///
/// All DSP runs here, outside the interrupt. The interrupt side only touches
/// the shared [`FrameExchange`] and [`ButtonInput`].
pub struct FrameController {
    engine: Engine,
    exchange: Arc<FrameExchange>,
    button: Arc<ButtonInput>,
    button_latched: bool,
    frames: u64,
    report_interval: u64,
    reported_overruns: u64,
}

impl FrameController {
    pub fn new(
        config: &EngineConfig,
        exchange: Arc<FrameExchange>,
        button: Arc<ButtonInput>,
    ) -> Self {
        Self {
            engine: Engine::new(config),
            exchange,
            button,
            button_latched: false,
            frames: 0,
            report_interval: ((config.sample_rate * OVERRUN_REPORT_SECONDS) as u64).max(1),
            reported_overruns: 0,
        }
    }

    /// One main-loop iteration.
    ///
    /// 1. If a frame is ready: copy it in, run the pipeline, copy the result
    ///    out and clear the flag.
    /// 2. Take at most one MIDI event.
    /// 3. Fire the function button on its rising edge only.
    pub fn poll<M: MidiReceiver + ?Sized>(&mut self, midi: &mut M) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        if self.exchange.frame_ready() {
            let input = self.exchange.read_input();
            let output = self.engine.process_frame(input);
            self.exchange.write_output(output);
            self.exchange.clear_frame_ready();

            self.frames += 1;
            outcome.frame_processed = true;
            if self.frames % self.report_interval == 0 {
                self.report_overruns();
            }
        }

        if let Some(event) = midi.pop() {
            outcome.midi_routed = self.engine.handle_midi(event);
        }

        let pressed = self.button.is_pressed();
        if pressed && !self.button_latched {
            self.engine.function_button();
            outcome.button_fired = true;
        }
        self.button_latched = pressed;

        outcome
    }

    /// Poll until `stop` is raised.
    pub fn run_until<M: MidiReceiver + ?Sized>(&mut self, midi: &mut M, stop: &AtomicBool) {
        while !stop.load(Ordering::Relaxed) {
            if !self.poll(midi).frame_processed {
                std::hint::spin_loop();
            }
        }
        self.report_overruns();
    }

    fn report_overruns(&mut self) {
        let overruns = self.exchange.overruns();
        if overruns > self.reported_overruns {
            debug!(
                dropped = overruns - self.reported_overruns,
                total = overruns,
                frames = self.frames,
                "frame overruns"
            );
            self.reported_overruns = overruns;
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Processed frames between overrun reports: one second at the engine rate.
    pub fn report_interval(&self) -> u64 {
        self.report_interval
    }

    /// Frames processed since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
