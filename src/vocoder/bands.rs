use crate::dsp::biquad::{Biquad, BiquadCoeffs};

pub const NUM_BANDS: usize = 18;

/// Band centres, roughly four per octave from 3100 Hz down to 165 Hz.
/// Shared by the analysis and shaping banks so band `n` of one lines up
/// with band `n` of the other.
pub const BAND_CENTERS_HZ: [f32; NUM_BANDS] = [
    3100.0, 2605.0, 2190.0, 1845.0, 1550.0, 1305.0, 1095.0, 920.0, 775.0, 650.0, 550.0, 460.0,
    390.0, 325.0, 275.0, 230.0, 195.0, 165.0,
];

/// Eighteen independent biquads, one per band.
#[derive(Debug, Clone)]
pub struct FilterBank {
    filters: [Biquad; NUM_BANDS],
}

impl FilterBank {
    /// Band-passes centred on [`BAND_CENTERS_HZ`].
    pub fn bandpass(sample_rate: f32, bandwidth_octaves: f32) -> Self {
        Self {
            filters: std::array::from_fn(|band| {
                Biquad::bandpass(BAND_CENTERS_HZ[band], sample_rate, bandwidth_octaves)
            }),
        }
    }

    /// Every band gets the same coefficients but keeps its own history.
    pub fn uniform(coeffs: BiquadCoeffs) -> Self {
        Self {
            filters: std::array::from_fn(|_| Biquad::new(coeffs)),
        }
    }

    /// Feed one sample to every band.
    #[inline]
    pub fn run_shared(&mut self, input: f32) {
        for filter in &mut self.filters {
            filter.run(input);
        }
    }

    /// Feed band `n` its own input `inputs[n]`.
    #[inline]
    pub fn run_per_band(&mut self, inputs: &[f32; NUM_BANDS]) {
        for (filter, &input) in self.filters.iter_mut().zip(inputs) {
            filter.run(input);
        }
    }

    #[inline]
    pub fn output(&self, band: usize) -> f32 {
        self.filters[band].last_output()
    }

    pub fn outputs(&self) -> [f32; NUM_BANDS] {
        std::array::from_fn(|band| self.output(band))
    }

    pub fn filter(&self, band: usize) -> &Biquad {
        &self.filters[band]
    }

    pub fn reset(&mut self) {
        self.filters.iter_mut().for_each(Biquad::reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AUDIO_FRAME_HZ;

    #[test]
    fn centers_descend() {
        assert!(BAND_CENTERS_HZ.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(BAND_CENTERS_HZ[0], 3100.0);
        assert_eq!(BAND_CENTERS_HZ[NUM_BANDS - 1], 165.0);
    }

    #[test]
    fn each_band_has_its_own_coefficients() {
        let bank = FilterBank::bandpass(AUDIO_FRAME_HZ, 0.2);
        for band in 1..NUM_BANDS {
            assert_ne!(bank.filter(band).coeffs(), bank.filter(band - 1).coeffs());
        }
    }

    #[test]
    fn per_band_inputs_stay_separate() {
        let mut bank = FilterBank::uniform(BiquadCoeffs::lowpass(100.0, AUDIO_FRAME_HZ / 6.0, 0.9));
        let mut inputs = [0.0; NUM_BANDS];
        inputs[4] = 1.0;
        for _ in 0..32 {
            bank.run_per_band(&inputs);
        }
        for band in 0..NUM_BANDS {
            if band == 4 {
                assert!(bank.output(band) > 0.0);
            } else {
                assert_eq!(bank.output(band), 0.0);
            }
        }
    }

    #[test]
    fn tone_lands_in_matching_band() {
        let mut bank = FilterBank::bandpass(AUDIO_FRAME_HZ, 0.2);
        let band = 6; // 1095 Hz
        let mut peaks = [0.0f32; NUM_BANDS];
        for n in 0..16_384 {
            let x = (std::f32::consts::TAU * BAND_CENTERS_HZ[band] * n as f32 / AUDIO_FRAME_HZ).sin();
            bank.run_shared(x);
            if n > 8192 {
                for (peak, out) in peaks.iter_mut().zip(bank.outputs()) {
                    *peak = peak.max(out.abs());
                }
            }
        }
        let loudest = peaks
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i);
        assert_eq!(loudest, Some(band));
    }
}
