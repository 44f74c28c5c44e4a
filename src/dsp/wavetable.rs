use std::f32::consts::TAU;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{MAX_AUDIO_LEVEL, MIN_AUDIO_LEVEL};

/// Entries per single-cycle table.
pub const TABLE_LEN: usize = 512;

/// The built-in table shapes, in the order the function button cycles them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveShape {
    Sine,
    Triangle,
    Saw,
    /// Short high pulse, low shelf, then a rising ramp over the second half.
    Novel,
}

impl WaveShape {
    pub const ALL: [WaveShape; 4] = [
        WaveShape::Sine,
        WaveShape::Triangle,
        WaveShape::Saw,
        WaveShape::Novel,
    ];

    fn index(self) -> usize {
        match self {
            WaveShape::Sine => 0,
            WaveShape::Triangle => 1,
            WaveShape::Saw => 2,
            WaveShape::Novel => 3,
        }
    }
}

/// One cycle of a waveform as signed 24-bit-range samples, scaled to the
/// synth headroom (±[`MAX_AUDIO_LEVEL`]). Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Wavetable {
    samples: [i32; TABLE_LEN],
}

impl Wavetable {
    pub fn new(shape: WaveShape) -> Self {
        match shape {
            WaveShape::Sine => Self::sine(),
            WaveShape::Triangle => Self::triangle(),
            WaveShape::Saw => Self::saw(),
            WaveShape::Novel => Self::novel(),
        }
    }

    /// Build a table from a function of phase (`0.0..1.0`) returning `-1.0..=1.0`.
    /// Output is clamped to the headroom.
    pub fn from_fn(mut f: impl FnMut(f32) -> f32) -> Self {
        let mut samples = [0i32; TABLE_LEN];
        for (i, s) in samples.iter_mut().enumerate() {
            let phase = i as f32 / TABLE_LEN as f32;
            *s = scale(f(phase));
        }
        Self { samples }
    }

    pub fn sine() -> Self {
        Self::from_fn(|phase| (TAU * phase).sin())
    }

    /// Rises from the floor to the ceiling over the first half, then mirrors.
    pub fn triangle() -> Self {
        let mut samples = [0i32; TABLE_LEN];
        for i in 0..TABLE_LEN {
            samples[i] = if 2 * i < TABLE_LEN {
                let ramp = 4.0 * i as f32 / TABLE_LEN as f32;
                (ramp * MAX_AUDIO_LEVEL as f32) as i32 + MIN_AUDIO_LEVEL
            } else {
                samples[TABLE_LEN - i - 1]
            };
        }
        Self { samples }
    }

    pub fn saw() -> Self {
        let mut samples = [0i32; TABLE_LEN];
        for (i, s) in samples.iter_mut().enumerate() {
            let ramp = 2.0 * i as f32 / TABLE_LEN as f32;
            *s = (ramp * MAX_AUDIO_LEVEL as f32) as i32 + MIN_AUDIO_LEVEL;
        }
        Self { samples }
    }

    pub fn novel() -> Self {
        let mut samples = [0i32; TABLE_LEN];
        for (i, s) in samples.iter_mut().enumerate() {
            *s = if 6 * i < TABLE_LEN {
                MAX_AUDIO_LEVEL
            } else if 2 * i < TABLE_LEN {
                MIN_AUDIO_LEVEL
            } else {
                let ramp = 4.0 * (i as f32 / TABLE_LEN as f32 - 0.5);
                (ramp * MAX_AUDIO_LEVEL as f32) as i32 + MIN_AUDIO_LEVEL
            };
        }
        Self { samples }
    }

    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        self.samples[index % TABLE_LEN]
    }

    pub fn samples(&self) -> &[i32; TABLE_LEN] {
        &self.samples
    }
}

impl std::fmt::Debug for Wavetable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (min, max) = self
            .samples
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        f.debug_struct("Wavetable")
            .field("len", &TABLE_LEN)
            .field("min", &min)
            .field("max", &max)
            .finish()
    }
}

#[inline]
fn scale(x: f32) -> i32 {
    ((x * MAX_AUDIO_LEVEL as f32) as i32).clamp(MIN_AUDIO_LEVEL, MAX_AUDIO_LEVEL)
}

/// All built-in tables, generated once, plus which one is active.
///
/// Handing out `Arc`s lets the synth swap tables without copying or
/// allocating on the audio path.
pub struct WavetableBank {
    tables: [Arc<Wavetable>; 4],
    active: WaveShape,
}

impl WavetableBank {
    pub fn new(active: WaveShape) -> Self {
        Self {
            tables: WaveShape::ALL.map(|shape| Arc::new(Wavetable::new(shape))),
            active,
        }
    }

    pub fn active_shape(&self) -> WaveShape {
        self.active
    }

    pub fn active(&self) -> Arc<Wavetable> {
        self.get(self.active)
    }

    pub fn get(&self, shape: WaveShape) -> Arc<Wavetable> {
        Arc::clone(&self.tables[shape.index()])
    }

    /// Advance to the next shape (wrapping) and return its table.
    pub fn next(&mut self) -> Arc<Wavetable> {
        let next = (self.active.index() + 1) % WaveShape::ALL.len();
        self.active = WaveShape::ALL[next];
        self.active()
    }
}

impl Default for WavetableBank {
    fn default() -> Self {
        Self::new(WaveShape::Saw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_headroom(table: &Wavetable) -> bool {
        table
            .samples()
            .iter()
            .all(|&s| (MIN_AUDIO_LEVEL..=MAX_AUDIO_LEVEL).contains(&s))
    }

    #[test]
    fn builtin_tables_stay_within_headroom() {
        for shape in WaveShape::ALL {
            let table = Wavetable::new(shape);
            assert!(within_headroom(&table), "{shape:?} exceeds headroom");
        }
    }

    #[test]
    fn sine_starts_at_zero_and_peaks_at_quarter() {
        let sine = Wavetable::sine();
        assert_eq!(sine.get(0), 0);
        assert!((sine.get(TABLE_LEN / 4) - MAX_AUDIO_LEVEL).abs() <= 1);
        assert!((sine.get(3 * TABLE_LEN / 4) - MIN_AUDIO_LEVEL).abs() <= 1);
    }

    #[test]
    fn triangle_is_mirrored() {
        let tri = Wavetable::triangle();
        assert_eq!(tri.get(0), MIN_AUDIO_LEVEL);
        for i in 0..TABLE_LEN / 2 {
            assert_eq!(tri.get(i), tri.get(TABLE_LEN - 1 - i));
        }
    }

    #[test]
    fn saw_rises_monotonically() {
        let saw = Wavetable::saw();
        assert_eq!(saw.get(0), MIN_AUDIO_LEVEL);
        assert!(saw.samples().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn novel_has_pulse_shelf_and_ramp() {
        let novel = Wavetable::novel();
        assert_eq!(novel.get(0), MAX_AUDIO_LEVEL);
        assert_eq!(novel.get(TABLE_LEN / 4), MIN_AUDIO_LEVEL);
        assert_eq!(novel.get(TABLE_LEN / 2), MIN_AUDIO_LEVEL);
        assert!(novel.get(TABLE_LEN - 1) > 2_900_000);
    }

    #[test]
    fn custom_tables_are_clamped() {
        let loud = Wavetable::from_fn(|_| 4.0);
        assert!(within_headroom(&loud));
        assert_eq!(loud.get(7), MAX_AUDIO_LEVEL);
    }

    #[test]
    fn get_wraps_index() {
        let saw = Wavetable::saw();
        assert_eq!(saw.get(TABLE_LEN), saw.get(0));
    }

    #[test]
    fn bank_cycles_through_every_shape() {
        let mut bank = WavetableBank::new(WaveShape::Saw);
        assert_eq!(*bank.active(), Wavetable::saw());
        bank.next();
        assert_eq!(bank.active_shape(), WaveShape::Novel);
        bank.next();
        assert_eq!(bank.active_shape(), WaveShape::Sine);
        let table = bank.next();
        assert_eq!(bank.active_shape(), WaveShape::Triangle);
        assert!(Arc::ptr_eq(&table, &bank.get(WaveShape::Triangle)));
    }
}
