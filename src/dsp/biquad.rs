use std::f64::consts::{LN_2, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Biquad Filters
==============

Every filter in the vocoder is the same second-order IIR section with a
different set of five coefficients. The coefficients come from Robert
Bristow-Johnson's "Audio EQ Cookbook":

    omega = 2π · f0 / fs

    | kind      | alpha                                   | b0          | b1           | b2          |
    | --------- | --------------------------------------- | ----------- | ------------ | ----------- |
    | low-pass  | sin(ω) / 2Q                             | (1 - cos)/2 | 1 - cos      | (1 - cos)/2 |
    | high-pass | sin(ω) / 2Q                             | (1 + cos)/2 | -(1 + cos)   | (1 + cos)/2 |
    | band-pass | sinh(ln2/2 · BW · ω/sin ω) · sin(ω)     | alpha       | 0            | -alpha      |

    a0 = 1 + alpha,  a1 = -2 cos(ω),  a2 = 1 - alpha

The band-pass form is the constant 0 dB peak gain variant, parameterised by
bandwidth in octaves rather than Q. All five stored coefficients are divided
by a0 so the difference equation needs no normalisation at run time:

    y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] - a1·y[n-1] - a2·y[n-2]

Coefficients are derived in f64 and stored as f32; the run step is pure f32.
*/

/// Replacement for a non-positive Q or bandwidth so alpha stays finite.
pub const MIN_Q_OR_BW: f32 = 0.001;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    LowPass,
    HighPass,
    /// Bandwidth-parameterised (octaves), 0 dB peak gain.
    BandPass,
}

/// Normalised coefficients `{b0, b1, b2, a1, a2}` (all divided by a0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoeffs {
    /// Coefficients of a filter that passes nothing.
    pub const SILENT: Self = Self {
        b0: 0.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Derive cookbook coefficients.
    ///
    /// `q_or_bw` is the resonance Q for [`FilterKind::LowPass`] and
    /// [`FilterKind::HighPass`], and the bandwidth in octaves for
    /// [`FilterKind::BandPass`]. Values that are not strictly positive are
    /// replaced by [`MIN_Q_OR_BW`].
    pub fn derive(center_hz: f32, sample_rate: f32, kind: FilterKind, q_or_bw: f32) -> Self {
        let q_or_bw = f64::from(if q_or_bw > 0.0 { q_or_bw } else { MIN_Q_OR_BW });

        let omega = 2.0 * PI * center_hz as f64 / sample_rate as f64;
        let sin_omega = omega.sin();
        let cos_omega = omega.cos();

        let (b0, b1, b2, alpha) = match kind {
            FilterKind::LowPass => {
                let alpha = sin_omega / (2.0 * q_or_bw);
                let b1 = 1.0 - cos_omega;
                (b1 / 2.0, b1, b1 / 2.0, alpha)
            }
            FilterKind::HighPass => {
                let alpha = sin_omega / (2.0 * q_or_bw);
                let b0 = (1.0 + cos_omega) / 2.0;
                (b0, -(1.0 + cos_omega), b0, alpha)
            }
            FilterKind::BandPass => {
                let alpha = (LN_2 / 2.0 * q_or_bw * omega / sin_omega).sinh() * sin_omega;
                (alpha, 0.0, -alpha, alpha)
            }
        };

        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        Self {
            b0: (b0 / a0) as f32,
            b1: (b1 / a0) as f32,
            b2: (b2 / a0) as f32,
            a1: (a1 / a0) as f32,
            a2: (a2 / a0) as f32,
        }
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        Self::derive(cutoff_hz, sample_rate, FilterKind::LowPass, q)
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        Self::derive(cutoff_hz, sample_rate, FilterKind::HighPass, q)
    }

    pub fn bandpass(center_hz: f32, sample_rate: f32, bandwidth_octaves: f32) -> Self {
        Self::derive(center_hz, sample_rate, FilterKind::BandPass, bandwidth_octaves)
    }

    /// `{b0, b1, b2, a1, a2}` in storage order.
    pub fn to_array(self) -> [f32; 5] {
        [self.b0, self.b1, self.b2, self.a1, self.a2]
    }

    /// Gain at 0 Hz: `(b0 + b1 + b2) / (1 + a1 + a2)`.
    pub fn dc_gain(&self) -> f32 {
        (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2)
    }
}

/// One filter instance: shared-nothing coefficients plus its own two samples
/// of input and output history.
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    inputs: [f32; 2],  // x[n-1], x[n-2]
    outputs: [f32; 2], // y[n-1], y[n-2]
}

impl Biquad {
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            inputs: [0.0; 2],
            outputs: [0.0; 2],
        }
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        Self::new(BiquadCoeffs::lowpass(cutoff_hz, sample_rate, q))
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32, q: f32) -> Self {
        Self::new(BiquadCoeffs::highpass(cutoff_hz, sample_rate, q))
    }

    pub fn bandpass(center_hz: f32, sample_rate: f32, bandwidth_octaves: f32) -> Self {
        Self::new(BiquadCoeffs::bandpass(center_hz, sample_rate, bandwidth_octaves))
    }

    /// Run one sample through the difference equation and shift history.
    #[inline]
    pub fn run(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.inputs[0] + c.b2 * self.inputs[1]
            - c.a1 * self.outputs[0]
            - c.a2 * self.outputs[1];

        self.inputs = [input, self.inputs[0]];
        self.outputs = [output, self.outputs[0]];
        output
    }

    /// Most recent output, i.e. what the last [`Biquad::run`] returned.
    #[inline]
    pub fn last_output(&self) -> f32 {
        self.outputs[0]
    }

    pub fn coeffs(&self) -> BiquadCoeffs {
        self.coeffs
    }

    pub fn reset(&mut self) {
        self.inputs = [0.0; 2];
        self.outputs = [0.0; 2];
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new(BiquadCoeffs::SILENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AUDIO_FRAME_HZ;

    fn sine_peak(filter: &mut Biquad, freq: f32, sample_rate: f32, len: usize) -> f32 {
        let skip = len / 2;
        (0..len)
            .map(|n| {
                let x = (std::f32::consts::TAU * freq * n as f32 / sample_rate).sin();
                filter.run(x)
            })
            .skip(skip)
            .fold(0.0f32, |acc, y| acc.max(y.abs()))
    }

    #[test]
    fn derivation_is_idempotent() {
        for kind in [FilterKind::LowPass, FilterKind::HighPass, FilterKind::BandPass] {
            let a = BiquadCoeffs::derive(1000.0, AUDIO_FRAME_HZ, kind, 0.9);
            let b = BiquadCoeffs::derive(1000.0, AUDIO_FRAME_HZ, kind, 0.9);
            assert_eq!(a.to_array(), b.to_array());
        }
    }

    #[test]
    fn lowpass_is_symmetric_with_unity_dc_gain() {
        let c = BiquadCoeffs::lowpass(3400.0, AUDIO_FRAME_HZ, 0.9);
        assert_eq!(c.b0, c.b2);
        assert!((c.dc_gain() - 1.0).abs() < 1e-3, "dc gain {}", c.dc_gain());

        let env = BiquadCoeffs::lowpass(100.0, AUDIO_FRAME_HZ / 6.0, 0.9);
        assert_eq!(env.b0, env.b2);
        assert!((env.dc_gain() - 1.0).abs() < 1e-2, "dc gain {}", env.dc_gain());
    }

    #[test]
    fn highpass_blocks_dc() {
        let c = BiquadCoeffs::highpass(3500.0, AUDIO_FRAME_HZ, 0.9);
        assert_eq!(c.b0, c.b2);
        assert!(c.dc_gain().abs() < 1e-4);
    }

    #[test]
    fn bandpass_has_antisymmetric_numerator() {
        let c = BiquadCoeffs::bandpass(1095.0, AUDIO_FRAME_HZ, 0.2);
        assert_eq!(c.b1, 0.0);
        assert_eq!(c.b0, -c.b2);
        assert!(c.dc_gain().abs() < 1e-6);
    }

    #[test]
    fn non_positive_q_is_replaced_not_rejected() {
        let zero = BiquadCoeffs::lowpass(1000.0, AUDIO_FRAME_HZ, 0.0);
        let negative = BiquadCoeffs::lowpass(1000.0, AUDIO_FRAME_HZ, -3.0);
        let epsilon = BiquadCoeffs::lowpass(1000.0, AUDIO_FRAME_HZ, MIN_Q_OR_BW);
        assert_eq!(zero, epsilon);
        assert_eq!(negative, epsilon);
        assert!(zero.to_array().iter().all(|c| c.is_finite()));

        let bw = BiquadCoeffs::bandpass(1000.0, AUDIO_FRAME_HZ, 0.0);
        assert!(bw.to_array().iter().all(|c| c.is_finite()));
    }

    #[test]
    fn lowpass_settles_to_step() {
        let mut filter = Biquad::lowpass(3400.0, AUDIO_FRAME_HZ, 0.9);
        let mut last = 0.0;
        for _ in 0..512 {
            last = filter.run(1.0);
        }
        assert!((last - 1.0).abs() < 1e-3, "got {last}");
        assert_eq!(filter.last_output(), last);
    }

    #[test]
    fn bandpass_emphasizes_center_frequency() {
        let mut filter = Biquad::bandpass(1000.0, AUDIO_FRAME_HZ, 0.2);
        let center = sine_peak(&mut filter, 1000.0, AUDIO_FRAME_HZ, 8192);
        filter.reset();
        let off = sine_peak(&mut filter, 250.0, AUDIO_FRAME_HZ, 8192);

        assert!((center - 1.0).abs() < 0.05, "center peak {center}");
        assert!(off < center * 0.2, "center={center}, off={off}");
    }

    #[test]
    fn instances_do_not_share_history() {
        let coeffs = BiquadCoeffs::lowpass(500.0, AUDIO_FRAME_HZ, 0.9);
        let mut a = Biquad::new(coeffs);
        let mut b = Biquad::new(coeffs);

        for _ in 0..16 {
            a.run(1.0);
        }
        assert_eq!(b.run(0.0), 0.0);
        assert!(a.last_output() > 0.0);
    }

    #[test]
    fn reset_clears_history() {
        let mut filter = Biquad::highpass(3500.0, AUDIO_FRAME_HZ, 0.9);
        filter.run(1.0);
        filter.run(-1.0);
        filter.reset();
        assert_eq!(filter.run(0.0), 0.0);
    }
}
