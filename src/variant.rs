//! Scheme variants.
//!
//! A variant decides nothing about resolution; it only selects the six
//! tonal palettes a scheme is built from, as hue/chroma transforms of the
//! seed. The error palette is fixed across all variants so "error red"
//! reads the same everywhere.

use crate::color::sanitize_degrees;
use crate::hct::Hct;
use crate::palette::TonalPalette;

/// Hue and chroma for the error palette, shared by every variant.
const ERROR_HUE: f64 = 25.0;
const ERROR_CHROMA: f64 = 84.0;

/// The palette-construction styles a scheme can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Grayscale; all palettes carry zero chroma.
    Monochrome,
    /// Near-grayscale with a hint of the seed hue.
    Neutral,
    /// Calm, moderately colorful; the default style.
    #[default]
    TonalSpot,
    /// Maximally distinct hues rotated away from the seed.
    Expressive,
    /// Playful; primary and secondary shifted 50° below the seed.
    FruitSalad,
}

/// The six palettes a variant derives from a seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorePalettes {
    pub primary: TonalPalette,
    pub secondary: TonalPalette,
    pub tertiary: TonalPalette,
    pub neutral: TonalPalette,
    pub neutral_variant: TonalPalette,
    pub error: TonalPalette,
}

impl Variant {
    /// Build the six palettes for a seed color.
    #[must_use]
    pub fn palettes(self, seed: Hct) -> CorePalettes {
        let hue = seed.hue();
        let palette = TonalPalette::from_hue_and_chroma;
        let (primary, secondary, tertiary, neutral, neutral_variant) = match self {
            Self::Monochrome => (
                palette(hue, 0.0),
                palette(hue, 0.0),
                palette(hue, 0.0),
                palette(hue, 0.0),
                palette(hue, 0.0),
            ),
            Self::Neutral => (
                palette(hue, 12.0),
                palette(hue, 8.0),
                palette(hue, 16.0),
                palette(hue, 2.0),
                palette(hue, 2.0),
            ),
            Self::TonalSpot => (
                palette(hue, 36.0),
                palette(hue, 16.0),
                palette(sanitize_degrees(hue + 60.0), 24.0),
                palette(hue, 6.0),
                palette(hue, 8.0),
            ),
            Self::Expressive => (
                palette(sanitize_degrees(hue + 240.0), 40.0),
                palette(rotated_hue(hue, &SECONDARY_ROTATIONS), 24.0),
                palette(rotated_hue(hue, &TERTIARY_ROTATIONS), 32.0),
                palette(sanitize_degrees(hue + 15.0), 8.0),
                palette(sanitize_degrees(hue + 15.0), 12.0),
            ),
            Self::FruitSalad => (
                palette(sanitize_degrees(hue - 50.0), 48.0),
                palette(sanitize_degrees(hue - 50.0), 36.0),
                palette(hue, 36.0),
                palette(hue, 10.0),
                palette(hue, 16.0),
            ),
        };
        CorePalettes {
            primary,
            secondary,
            tertiary,
            neutral,
            neutral_variant,
            error: palette(ERROR_HUE, ERROR_CHROMA),
        }
    }
}

// ── Expressive hue rotation ─────────────────────────────────────────────

/// Breakpoints partitioning the hue circle; `ROTATIONS[i]` applies to
/// seeds whose hue falls in `[HUES[i], HUES[i + 1])`.
const HUES: [f64; 9] = [0.0, 21.0, 51.0, 121.0, 151.0, 191.0, 271.0, 321.0, 360.0];

const SECONDARY_ROTATIONS: [f64; 9] = [45.0, 95.0, 45.0, 20.0, 45.0, 90.0, 45.0, 45.0, 45.0];

const TERTIARY_ROTATIONS: [f64; 9] = [120.0, 120.0, 20.0, 45.0, 20.0, 15.0, 75.0, 12.0, 12.0];

fn rotated_hue(source_hue: f64, rotations: &[f64; 9]) -> f64 {
    let hue = sanitize_degrees(source_hue);
    for index in 0..HUES.len() - 1 {
        if HUES[index] <= hue && hue < HUES[index + 1] {
            return sanitize_degrees(hue + rotations[index]);
        }
    }
    hue
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(hue: f64) -> Hct {
        Hct::new(hue, 48.0, 50.0)
    }

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn monochrome_strips_all_chroma() {
        let palettes = Variant::Monochrome.palettes(seed(120.0));
        for palette in [
            palettes.primary,
            palettes.secondary,
            palettes.tertiary,
            palettes.neutral,
            palettes.neutral_variant,
        ] {
            assert!(approx_eq(palette.chroma(), 0.0, 1e-12));
        }
    }

    #[test]
    fn error_palette_is_variant_independent() {
        for variant in [
            Variant::Monochrome,
            Variant::Neutral,
            Variant::TonalSpot,
            Variant::Expressive,
            Variant::FruitSalad,
        ] {
            let palettes = variant.palettes(seed(200.0));
            assert!(approx_eq(palettes.error.hue(), ERROR_HUE, 1e-12));
            assert!(approx_eq(palettes.error.chroma(), ERROR_CHROMA, 1e-12));
        }
    }

    #[test]
    fn tonal_spot_offsets_tertiary_by_sixty() {
        let source = seed(10.0);
        let palettes = Variant::TonalSpot.palettes(source);
        assert!(approx_eq(palettes.primary.hue(), source.hue(), 1e-9));
        assert!(approx_eq(
            palettes.tertiary.hue(),
            sanitize_degrees(source.hue() + 60.0),
            1e-9,
        ));
        assert!(approx_eq(palettes.primary.chroma(), 36.0, 1e-12));
        assert!(approx_eq(palettes.neutral.chroma(), 6.0, 1e-12));
    }

    #[test]
    fn tonal_spot_tertiary_wraps_around_the_circle() {
        let source = seed(330.0);
        let palettes = Variant::TonalSpot.palettes(source);
        let expected = sanitize_degrees(source.hue() + 60.0);
        assert!(expected < 60.0, "hue should have wrapped, got {expected}");
        assert!(approx_eq(palettes.tertiary.hue(), expected, 1e-9));
    }

    #[test]
    fn fruit_salad_shifts_primary_below_the_seed() {
        let source = seed(20.0);
        let palettes = Variant::FruitSalad.palettes(source);
        let expected = sanitize_degrees(source.hue() - 50.0);
        assert!(approx_eq(palettes.primary.hue(), expected, 1e-9));
        assert!(approx_eq(palettes.secondary.hue(), expected, 1e-9));
        assert!(approx_eq(palettes.primary.chroma(), 48.0, 1e-12));
    }

    #[test]
    fn expressive_rotates_secondary_by_band() {
        // A seed hue of 30° falls in the [21, 51) band: rotation 95°.
        let palettes = Variant::Expressive.palettes(Hct::new(30.0, 48.0, 50.0));
        let source = Hct::new(30.0, 48.0, 50.0);
        assert!(approx_eq(
            palettes.secondary.hue(),
            sanitize_degrees(source.hue() + 95.0),
            1e-6,
        ));
        assert!(approx_eq(
            palettes.tertiary.hue(),
            sanitize_degrees(source.hue() + 120.0),
            1e-6,
        ));
    }

    #[test]
    fn neutral_keeps_every_palette_near_gray() {
        let palettes = Variant::Neutral.palettes(seed(250.0));
        assert!(palettes.primary.chroma() <= 12.0);
        assert!(palettes.neutral.chroma() <= 2.0);
    }
}
