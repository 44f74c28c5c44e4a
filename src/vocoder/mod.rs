//! The vocoder: voice in, synth carrier in, one modulated sample out.

pub mod bands;
pub mod schedule;

use crate::{
    config::VocoderConfig,
    dsp::biquad::{Biquad, BiquadCoeffs},
};

use self::{
    bands::{FilterBank, NUM_BANDS},
    schedule::{DownsampleSchedule, ScheduleStage, DOWNSAMPLE_RATE},
};

/*
Signal Flow
===========

    voice ──┬─► antialias LP (3400 Hz) ──► analysis BP ×18 ──► |x| ──► envelope LP ×18 ──┐
            │                              (fs/6, frame 0)          (fs/6, frame 1)     │
            │                                                                           ▼
            │                        synth ──► shaping BP ×18 (fs) ──────────────────► Σ carrier·env·scale
            │                                                                           │
            └─► sibilance HP (3500 Hz) ──────────────────────────────────────────────► + ──► out

The analysis and envelope banks are only evaluated once every six frames and
their coefficients are derived for fs/6, so they see a decimated signal
without any extra resampling. In between, the shaping bank keeps running at
the full rate against the last envelope values.

Latency, in frames, through the modulated path:

    antialias 2 + analysis up to 12 + envelope offset 1 + shaping 2

Moving any of these stages changes the timbre, so the order in
`process` is fixed.
*/

pub struct Vocoder {
    antialias: Biquad,
    sibilance: Biquad,
    analysis: FilterBank,
    analysis_abs: [f32; NUM_BANDS],
    envelope: FilterBank,
    shaping: FilterBank,
    schedule: DownsampleSchedule,
    modulation_scale: f32,
    sibilance_gain: f32,
}

impl Vocoder {
    pub fn new(config: &VocoderConfig, sample_rate: f32) -> Self {
        let decimated_rate = sample_rate / DOWNSAMPLE_RATE as f32;

        Self {
            antialias: Biquad::lowpass(config.antialias_hz, sample_rate, config.antialias_q),
            sibilance: Biquad::highpass(config.sibilance_hz, sample_rate, config.sibilance_q),
            analysis: FilterBank::bandpass(decimated_rate, config.analysis_bandwidth),
            analysis_abs: [0.0; NUM_BANDS],
            envelope: FilterBank::uniform(BiquadCoeffs::lowpass(
                config.envelope_hz,
                decimated_rate,
                config.envelope_q,
            )),
            shaping: FilterBank::bandpass(sample_rate, config.shaping_bandwidth),
            schedule: DownsampleSchedule::new(),
            modulation_scale: config.modulation_scale,
            sibilance_gain: config.sibilance_gain,
        }
    }

    /// Process one frame.
    ///
    /// `voice` is the raw microphone sample and `carrier` the synth sample for
    /// this frame, both in 24-bit sample units. Returns the mono output.
    pub fn process(&mut self, voice: f32, carrier: f32) -> f32 {
        let voice_lp = self.antialias.run(voice);
        let sibilance = self.sibilance.run(voice);

        match self.schedule.tick() {
            ScheduleStage::Analysis => {
                self.analysis.run_shared(voice_lp);
                for (band, abs) in self.analysis_abs.iter_mut().enumerate() {
                    *abs = self.analysis.output(band).abs();
                }
            }
            ScheduleStage::Envelope => self.envelope.run_per_band(&self.analysis_abs),
            ScheduleStage::Idle => {}
        }

        self.shaping.run_shared(carrier);

        let modulated: f32 = (0..NUM_BANDS)
            .map(|band| self.shaping.output(band) * self.envelope.output(band))
            .sum::<f32>()
            * self.modulation_scale;

        modulated + sibilance * self.sibilance_gain
    }

    /// Current smoothed envelope per band.
    pub fn envelopes(&self) -> [f32; NUM_BANDS] {
        self.envelope.outputs()
    }

    /// Latest analysis magnitudes per band.
    pub fn analysis_levels(&self) -> &[f32; NUM_BANDS] {
        &self.analysis_abs
    }

    pub fn schedule(&self) -> &DownsampleSchedule {
        &self.schedule
    }

    pub fn reset(&mut self) {
        self.antialias.reset();
        self.sibilance.reset();
        self.analysis.reset();
        self.analysis_abs = [0.0; NUM_BANDS];
        self.envelope.reset();
        self.shaping.reset();
        self.schedule.reset();
    }
}
