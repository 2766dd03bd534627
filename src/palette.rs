//! Tonal palettes — one hue/chroma pair, every tone.
//!
//! A palette is a stateless function from tone to device color: the hue and
//! chroma are fixed at construction and each lookup re-runs the solver at
//! the requested tone. Construction is the only mutation; schemes hold six
//! of these and never touch them again.

use crate::color::Argb;
use crate::hct::{Hct, solve_to_argb};

/// A fixed (hue, chroma) pair exposing the device color at any tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonalPalette {
    hue: f64,
    chroma: f64,
}

impl TonalPalette {
    /// Palette at an explicit hue and chroma.
    #[must_use]
    pub const fn from_hue_and_chroma(hue: f64, chroma: f64) -> Self {
        Self { hue, chroma }
    }

    /// Palette through an existing color's hue and chroma.
    #[must_use]
    pub fn from_hct(hct: Hct) -> Self {
        Self::from_hue_and_chroma(hct.hue(), hct.chroma())
    }

    /// The palette's hue in degrees.
    #[inline]
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// The palette's chroma.
    #[inline]
    #[must_use]
    pub const fn chroma(&self) -> f64 {
        self.chroma
    }

    /// Device color at the given tone. Tones outside [0, 100] are clamped;
    /// chroma the gamut cannot reach at this tone is reduced by the solver.
    #[must_use]
    pub fn tone(&self, tone: f64) -> Argb {
        solve_to_argb(self.hue, self.chroma, tone.clamp(0.0, 100.0))
    }

    /// [`Self::tone`] wrapped back into HCT.
    #[must_use]
    pub fn hct(&self, tone: f64) -> Hct {
        Hct::from_argb(self.tone(tone))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hue_distance;
    use crate::hct::tone_from_argb;
    use pretty_assertions::assert_eq;

    #[test]
    fn endpoints_are_black_and_white() {
        let palette = TonalPalette::from_hue_and_chroma(270.0, 40.0);
        assert_eq!(palette.tone(0.0), Argb::from_rgb(0, 0, 0));
        assert_eq!(palette.tone(100.0), Argb::from_rgb(255, 255, 255));
    }

    #[test]
    fn out_of_range_tone_clamps() {
        let palette = TonalPalette::from_hue_and_chroma(270.0, 40.0);
        assert_eq!(palette.tone(-25.0), palette.tone(0.0));
        assert_eq!(palette.tone(250.0), palette.tone(100.0));
    }

    #[test]
    fn tones_land_where_requested() {
        let palette = TonalPalette::from_hue_and_chroma(120.0, 30.0);
        for tone in [10.0, 30.0, 50.0, 70.0, 90.0] {
            let achieved = tone_from_argb(palette.tone(tone));
            assert!(
                (achieved - tone).abs() <= 0.5,
                "tone {tone} landed at {achieved}"
            );
        }
    }

    #[test]
    fn hue_held_across_the_ramp() {
        let palette = TonalPalette::from_hue_and_chroma(250.0, 40.0);
        for tone in [20.0, 40.0, 60.0, 80.0] {
            let hct = palette.hct(tone);
            if hct.chroma() > 3.0 {
                assert!(
                    hue_distance(hct.hue(), 250.0) <= 4.0,
                    "hue drifted to {} at tone {tone}",
                    hct.hue()
                );
            }
        }
    }

    #[test]
    fn zero_chroma_palette_is_grayscale() {
        let palette = TonalPalette::from_hue_and_chroma(180.0, 0.0);
        let color = palette.tone(50.0);
        assert_eq!(color.red, color.green);
        assert_eq!(color.green, color.blue);
    }

    #[test]
    fn lookups_are_deterministic() {
        let palette = TonalPalette::from_hue_and_chroma(311.0, 48.0);
        assert_eq!(palette.tone(40.0), palette.tone(40.0));
    }

    #[test]
    fn from_hct_captures_hue_and_chroma() {
        let seed = Hct::from_argb(Argb::from_rgb(103, 80, 164));
        let palette = TonalPalette::from_hct(seed);
        assert!((palette.hue() - seed.hue()).abs() < 1e-9);
        assert!((palette.chroma() - seed.chroma()).abs() < 1e-9);
    }
}
