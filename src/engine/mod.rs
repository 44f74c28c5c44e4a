pub mod button;
pub mod controller;
pub mod exchange;
pub mod irq;
pub mod transport;

use tracing::info;

use crate::{
    config::EngineConfig,
    dsp::wavetable::WavetableBank,
    io::{converter::saturate_s24, midi::MidiEvent, route_midi},
    synth::{demo::DemoChords, poly::WavetableSynth},
    vocoder::Vocoder,
    FRAME_WORDS,
};

/// Input channel carrying the microphone.
pub const VOICE_CHANNEL: usize = 1;

/// Synth, vocoder and the state the function button steps through.
///
/// Owns every piece of per-frame DSP state; the controller only decides when
/// to call it.
pub struct Engine {
    synth: WavetableSynth,
    vocoder: Vocoder,
    wavetables: WavetableBank,
    demo: Option<DemoChords>,
}

impl Engine {
    /// # Panics
    ///
    /// Panics if the synth's reference index lies outside its voice pool.
    /// Call [`EngineConfig::validate`] first to get an error instead.
    pub fn new(config: &EngineConfig) -> Self {
        let wavetables = WavetableBank::new(config.initial_waveform);
        let mut synth = WavetableSynth::new(&config.synth, config.sample_rate, wavetables.active());
        let vocoder = Vocoder::new(&config.vocoder, config.sample_rate);

        let demo = config.demo_mode.then(|| {
            let demo = DemoChords::new();
            demo.play(&mut synth);
            demo
        });

        info!(
            sample_rate = config.sample_rate,
            waveform = ?config.initial_waveform,
            demo_mode = config.demo_mode,
            midi_channel = config.synth.midi_channel + 1,
            "engine initialised"
        );

        Self {
            synth,
            vocoder,
            wavetables,
            demo,
        }
    }

    /// One full pipeline pass: render the synth, vocode it against the voice
    /// channel, and duplicate the mono result to both output channels.
    pub fn process_frame(&mut self, input: [i32; FRAME_WORDS]) -> [i32; FRAME_WORDS] {
        let voice = input[VOICE_CHANNEL] as f32;
        let carrier = self.synth.render_sample() as f32;
        let out = saturate_s24(self.vocoder.process(voice, carrier) as i32);
        [out; FRAME_WORDS]
    }

    /// Route a MIDI event to the synth. Ignored in demo mode.
    pub fn handle_midi(&mut self, event: MidiEvent) -> bool {
        if self.demo.is_some() {
            return false;
        }
        route_midi(&mut self.synth, event)
    }

    /// The function button: next demo chord in demo mode, next waveform otherwise.
    pub fn function_button(&mut self) {
        match &mut self.demo {
            Some(demo) => demo.advance(&mut self.synth),
            None => {
                let table = self.wavetables.next();
                self.synth.set_wavetable(table);
                info!(waveform = ?self.wavetables.active_shape(), "waveform changed");
            }
        }
    }

    pub fn synth(&self) -> &WavetableSynth {
        &self.synth
    }

    pub fn synth_mut(&mut self) -> &mut WavetableSynth {
        &mut self.synth
    }

    pub fn vocoder(&self) -> &Vocoder {
        &self.vocoder
    }

    pub fn wavetables(&self) -> &WavetableBank {
        &self.wavetables
    }

    pub fn demo(&self) -> Option<&DemoChords> {
        self.demo.as_ref()
    }
}
