//! Contrast arithmetic on tones.
//!
//! Tone is L*, and L* maps monotonically to relative luminance, so contrast
//! between two colors depends only on their tones — not on hue or chroma.
//! That is the property the whole resolution engine leans on: pick tones
//! that satisfy a ratio, then let each palette color the tone however it
//! likes.
//!
//! Ratios use the WCAG formula `(L_lighter + 0.05) / (L_darker + 0.05)`
//! with luminance normalized to [0, 1], giving the familiar 1.0–21.0 range.

use crate::color::{lstar_from_y, y_from_lstar};

/// Tones returned by [`lighter`] and [`darker`] are nudged this far past
/// the mathematical answer so 8-bit quantization cannot undershoot the
/// requested ratio.
const QUANTIZATION_MARGIN: f64 = 0.4;

/// Accept a near-miss this close to the requested ratio; rounding in the
/// luminance curve makes exact equality unreliable at the scale edges.
const RATIO_EPSILON: f64 = 0.04;

/// Relative luminance in [0, 1] for a tone in [0, 100]. Strictly
/// increasing.
#[must_use]
pub fn relative_luminance(tone: f64) -> f64 {
    y_from_lstar(tone.clamp(0.0, 100.0)) / 100.0
}

/// Contrast ratio between two tones, ≥ 1.0. Symmetric in its arguments.
#[must_use]
pub fn ratio_of_tones(tone_a: f64, tone_b: f64) -> f64 {
    let y_a = y_from_lstar(tone_a.clamp(0.0, 100.0));
    let y_b = y_from_lstar(tone_b.clamp(0.0, 100.0));
    ratio_of_ys(y_a, y_b)
}

fn ratio_of_ys(y_a: f64, y_b: f64) -> f64 {
    let lighter = y_a.max(y_b);
    let darker = y_a.min(y_b);
    (lighter + 5.0) / (darker + 5.0)
}

/// The darkest tone lighter than `tone` with at least `ratio` contrast
/// against it, or `None` if no such tone fits on the scale.
#[must_use]
pub fn lighter(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }
    let dark_y = y_from_lstar(tone);
    let light_y = ratio.mul_add(dark_y + 5.0, -5.0);
    if !(0.0..=100.0).contains(&light_y) {
        return None;
    }
    // The formula inverts exactly, but the luminance curve's piecewise knee
    // can leave the real ratio a hair short; reject genuine misses.
    let real_contrast = ratio_of_ys(light_y, dark_y);
    if real_contrast < ratio && (real_contrast - ratio).abs() > RATIO_EPSILON {
        return None;
    }
    let value = lstar_from_y(light_y) + QUANTIZATION_MARGIN;
    (0.0..=100.0).contains(&value).then_some(value)
}

/// The lightest tone darker than `tone` with at least `ratio` contrast
/// against it, or `None` if no such tone fits on the scale.
#[must_use]
pub fn darker(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }
    let light_y = y_from_lstar(tone);
    let dark_y = (light_y + 5.0) / ratio - 5.0;
    if !(0.0..=100.0).contains(&dark_y) {
        return None;
    }
    let real_contrast = ratio_of_ys(light_y, dark_y);
    if real_contrast < ratio && (real_contrast - ratio).abs() > RATIO_EPSILON {
        return None;
    }
    let value = lstar_from_y(dark_y) - QUANTIZATION_MARGIN;
    (0.0..=100.0).contains(&value).then_some(value)
}

/// [`lighter`], degrading to tone 100 when the ratio is unattainable in
/// the lighter direction.
#[must_use]
pub fn lighter_unsafe(tone: f64, ratio: f64) -> f64 {
    lighter(tone, ratio).unwrap_or(100.0)
}

/// [`darker`], degrading to tone 0 when the ratio is unattainable in the
/// darker direction.
#[must_use]
pub fn darker_unsafe(tone: f64, ratio: f64) -> f64 {
    darker(tone, ratio).unwrap_or(0.0)
}

/// Outcome of a [`tone_for_ratio`] search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSearch {
    /// The tone to use.
    pub tone: f64,
    /// Whether the requested ratio was actually reached. When `false`,
    /// `tone` is the scale boundary that maximizes the achieved ratio.
    pub attained: bool,
}

/// Nearest tone to `reference` achieving `ratio` against it, searching the
/// preferred direction first, then the other, then degrading to the best
/// boundary. Never fails: callers get a usable tone either way.
#[must_use]
pub fn tone_for_ratio(reference: f64, ratio: f64, prefer_lighter: bool) -> ToneSearch {
    let reference = reference.clamp(0.0, 100.0);
    let (preferred, fallback) = if prefer_lighter {
        (lighter(reference, ratio), darker(reference, ratio))
    } else {
        (darker(reference, ratio), lighter(reference, ratio))
    };
    if let Some(tone) = preferred.or(fallback) {
        return ToneSearch { tone, attained: true };
    }
    // Unattainable in either direction: pick the boundary with the higher
    // achieved ratio.
    let tone = if ratio_of_tones(0.0, reference) >= ratio_of_tones(100.0, reference) {
        0.0
    } else {
        100.0
    };
    ToneSearch { tone, attained: false }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Luminance ───────────────────────────────────────────────────

    #[test]
    fn luminance_endpoints() {
        assert!(approx_eq(relative_luminance(0.0), 0.0, 1e-9));
        assert!(approx_eq(relative_luminance(100.0), 1.0, 1e-9));
    }

    #[test]
    fn luminance_strictly_increasing() {
        let mut previous = relative_luminance(0.0);
        let mut tone = 0.5;
        while tone <= 100.0 {
            let lum = relative_luminance(tone);
            assert!(lum > previous, "not increasing at tone {tone}");
            previous = lum;
            tone += 0.5;
        }
    }

    // ── Ratio ───────────────────────────────────────────────────────

    #[test]
    fn black_on_white_is_21() {
        assert!(approx_eq(ratio_of_tones(0.0, 100.0), 21.0, 1e-6));
    }

    #[test]
    fn same_tone_is_1() {
        assert!(approx_eq(ratio_of_tones(42.0, 42.0), 1.0, 1e-9));
    }

    #[test]
    fn ratio_is_symmetric() {
        for (a, b) in [(10.0, 90.0), (35.0, 60.0), (0.0, 50.0)] {
            assert!(approx_eq(ratio_of_tones(a, b), ratio_of_tones(b, a), 1e-12));
        }
    }

    #[test]
    fn ratio_at_least_one() {
        let mut a = 0.0;
        while a <= 100.0 {
            let mut b = 0.0;
            while b <= 100.0 {
                assert!(ratio_of_tones(a, b) >= 1.0);
                b += 10.0;
            }
            a += 10.0;
        }
    }

    #[test]
    fn out_of_range_tones_clamped() {
        assert!(approx_eq(
            ratio_of_tones(-10.0, 110.0),
            ratio_of_tones(0.0, 100.0),
            1e-12
        ));
    }

    // ── Directional search ──────────────────────────────────────────

    #[test]
    fn lighter_reaches_requested_ratio() {
        for ratio in [1.5, 3.0, 4.5, 7.0] {
            let tone = lighter(30.0, ratio).unwrap();
            assert!(
                ratio_of_tones(tone, 30.0) >= ratio - 0.05,
                "ratio {ratio}: got tone {tone} at {}",
                ratio_of_tones(tone, 30.0)
            );
            assert!(tone > 30.0);
        }
    }

    #[test]
    fn darker_reaches_requested_ratio() {
        for ratio in [1.5, 3.0, 4.5, 7.0] {
            let tone = darker(80.0, ratio).unwrap();
            assert!(
                ratio_of_tones(tone, 80.0) >= ratio - 0.05,
                "ratio {ratio}: got tone {tone} at {}",
                ratio_of_tones(tone, 80.0)
            );
            assert!(tone < 80.0);
        }
    }

    #[test]
    fn lighter_fails_when_impossible() {
        // Nothing is 7:1 lighter than a near-white tone.
        assert!(lighter(95.0, 7.0).is_none());
    }

    #[test]
    fn darker_fails_when_impossible() {
        assert!(darker(10.0, 7.0).is_none());
    }

    #[test]
    fn unsafe_variants_degrade_to_boundaries() {
        assert!(approx_eq(lighter_unsafe(95.0, 7.0), 100.0, 1e-9));
        assert!(approx_eq(darker_unsafe(10.0, 7.0), 0.0, 1e-9));
    }

    #[test]
    fn unsafe_variants_pass_through_when_possible() {
        assert!(approx_eq(lighter_unsafe(30.0, 4.5), lighter(30.0, 4.5).unwrap(), 1e-12));
    }

    // ── tone_for_ratio ──────────────────────────────────────────────

    #[test]
    fn prefers_requested_direction() {
        let result = tone_for_ratio(50.0, 3.0, true);
        assert!(result.attained);
        assert!(result.tone > 50.0, "expected lighter, got {}", result.tone);

        let result = tone_for_ratio(50.0, 3.0, false);
        assert!(result.attained);
        assert!(result.tone < 50.0, "expected darker, got {}", result.tone);
    }

    #[test]
    fn falls_back_to_other_direction() {
        // 7:1 against tone 90 only exists below it.
        let result = tone_for_ratio(90.0, 7.0, true);
        assert!(result.attained);
        assert!(result.tone < 90.0);
    }

    #[test]
    fn impossible_ratio_degrades_to_best_boundary() {
        // 21:1 against mid-gray is unattainable; black achieves more
        // contrast against tone 50 than white does.
        let result = tone_for_ratio(50.0, 21.0, true);
        assert!(!result.attained);
        assert!(approx_eq(result.tone, 0.0, 1e-9));
    }

    #[test]
    fn nearest_not_farthest() {
        // The search result should sit near the minimum satisfying tone,
        // not at the extreme.
        let result = tone_for_ratio(20.0, 3.0, true);
        assert!(result.attained);
        assert!(result.tone < 90.0, "overshot: {}", result.tone);
        assert!(ratio_of_tones(result.tone, 20.0) >= 2.95);
    }
}
