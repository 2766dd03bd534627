//! HCT: hue, chroma, tone — the crate's working color representation.
//!
//! Hue and chroma come straight from the CAM16 forward transform. Tone is
//! CIE L*, calibrated to device luminance, so lightness can be moved
//! independently of hue and chroma with predictable visual results.
//!
//! The forward direction (device color → HCT) is a single CAM16 pass. The
//! reverse direction has no closed form: CAM16 lightness J is a nonlinear,
//! hue/chroma-dependent function of luminance, so [`solve_to_argb`] runs a
//! bounded nested bisection — an outer search over chroma, an inner search
//! over J — accepting a candidate only when its clipped device color lands
//! on the requested tone and its hue survived clipping. When the requested
//! triple is outside the sRGB gamut, chroma is silently reduced; hue and
//! tone are preserved as closely as the gamut allows.

use crate::cam::Cam16;
use crate::color::{Argb, argb_from_lstar, lstar_from_argb, sanitize_degrees};

// The solver's numerical-stability knobs. Tightening the endpoints buys
// precision at the cost of more CAM16 evaluations per solve.

/// A candidate is accepted only if its tone is within this many tone units
/// of the target.
pub const TONE_TOLERANCE: f64 = 0.2;

/// A candidate is accepted only if gamut clipping moved its appearance by
/// at most this CAM16-UCS ΔE (this is what keeps hue exact).
pub const APPEARANCE_TOLERANCE: f64 = 1.0;

/// The outer chroma bisection stops once its interval is this narrow.
pub const CHROMA_SEARCH_ENDPOINT: f64 = 0.4;

/// The inner lightness-J bisection stops once its interval is this narrow.
pub const LIGHTNESS_SEARCH_ENDPOINT: f64 = 0.01;

/// Hard cap on iterations for either bisection. The interval-width exits
/// fire long before this; the cap guarantees termination outright.
pub const MAX_BISECT_ITERATIONS: u32 = 100;

/// Tones this close to 0 or 100 map straight to black/white; anything
/// farther in can still hold chroma and goes through the search.
pub const TONE_EXTREME_EPSILON: f64 = 1e-4;

/// A color in hue/chroma/tone form.
///
/// Construction always goes through the solver or the forward transform,
/// so the stored components describe a real, in-gamut device color: asking
/// for more chroma than the gamut holds yields an `Hct` whose `chroma`
/// reports what was actually achievable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    argb: Argb,
}

impl Hct {
    /// Solve for the device color closest to (hue, chroma, tone) and wrap
    /// it. Hue is normalized into [0, 360), tone clamped to [0, 100],
    /// chroma reduced if the gamut demands it.
    #[must_use]
    pub fn new(hue: f64, chroma: f64, tone: f64) -> Self {
        Self::from_argb(solve_to_argb(hue, chroma, tone))
    }

    /// The appearance of an existing device color.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        let cam = Cam16::from_argb(argb);
        Self {
            hue: cam.hue,
            chroma: cam.chroma,
            tone: lstar_from_argb(argb),
            argb,
        }
    }

    /// Hue angle in degrees, [0, 360).
    #[inline]
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Chroma actually achieved (≥ 0, gamut-limited).
    #[inline]
    #[must_use]
    pub const fn chroma(&self) -> f64 {
        self.chroma
    }

    /// Tone (L*), [0, 100].
    #[inline]
    #[must_use]
    pub const fn tone(&self) -> f64 {
        self.tone
    }

    /// The underlying device color.
    #[inline]
    #[must_use]
    pub const fn to_argb(&self) -> Argb {
        self.argb
    }

    /// This color with its tone replaced, hue and chroma re-solved.
    #[must_use]
    pub fn with_tone(&self, tone: f64) -> Self {
        Self::new(self.hue, self.chroma, tone)
    }
}

/// Fast path for callers that only need lightness: tone of a device color
/// without running the full appearance model.
#[must_use]
pub fn tone_from_argb(argb: Argb) -> f64 {
    lstar_from_argb(argb)
}

/// Find the device color closest to the requested (hue, chroma, tone).
///
/// Grays and the literal tone extremes bypass the search entirely — hue
/// is undefined at zero chroma, and only pure black/white exist at tones
/// 0 and 100.
#[must_use]
pub fn solve_to_argb(hue: f64, chroma: f64, tone: f64) -> Argb {
    let tone = tone.clamp(0.0, 100.0);
    if chroma < 1.0 || tone < TONE_EXTREME_EPSILON || tone > 100.0 - TONE_EXTREME_EPSILON {
        return argb_from_lstar(tone);
    }

    let hue = sanitize_degrees(hue);
    let mut high = chroma;
    let mut mid = chroma;
    let mut low = 0.0;
    let mut first_loop = true;
    let mut answer: Option<Argb> = None;

    let mut iterations = 0;
    while (low - high).abs() >= CHROMA_SEARCH_ENDPOINT && iterations < MAX_BISECT_ITERATIONS {
        iterations += 1;

        let possible = find_argb_by_j(hue, mid, tone);
        if first_loop {
            // The requested chroma itself may already be achievable.
            if let Some(argb) = possible {
                return argb;
            }
            first_loop = false;
            mid = low + (high - low) / 2.0;
            continue;
        }

        if let Some(argb) = possible {
            answer = Some(argb);
            low = mid;
        } else {
            high = mid;
        }
        mid = low + (high - low) / 2.0;
    }

    // Nothing chromatic fit — fall back to the gray at this tone.
    answer.unwrap_or_else(|| argb_from_lstar(tone))
}

/// Bisect CAM16 lightness J looking for a device color at `chroma` and
/// `hue` whose tone matches the target. Returns `None` when clipping
/// pushes every candidate off the requested tone or hue.
fn find_argb_by_j(hue: f64, chroma: f64, tone: f64) -> Option<Argb> {
    let mut low = 0.0_f64;
    let mut high = 100.0_f64;
    let mut best_de = 1000.0;
    let mut best: Option<Argb> = None;

    let mut iterations = 0;
    while (low - high).abs() > LIGHTNESS_SEARCH_ENDPOINT && iterations < MAX_BISECT_ITERATIONS {
        iterations += 1;

        let mid_j = low + (high - low) / 2.0;
        // The inverse clamps to the gamut, so this is what the display
        // would actually show for the candidate.
        let clipped = Cam16::argb_from_jch(mid_j, chroma, hue);
        let clipped_lstar = lstar_from_argb(clipped);
        let d_l = (tone - clipped_lstar).abs();

        if d_l < TONE_TOLERANCE {
            let cam_clipped = Cam16::from_argb(clipped);
            let target = Cam16::from_jch_ucs(cam_clipped.j, cam_clipped.chroma, hue);
            let d_e = cam_clipped.distance(&target);
            if d_e <= APPEARANCE_TOLERANCE && d_e <= best_de {
                best_de = d_e;
                best = Some(clipped);
            }
        }

        if clipped_lstar < tone {
            low = mid_j;
        } else {
            high = mid_j;
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hue_distance;

    #[test]
    fn known_seed_appearance() {
        // The reference purple seed: hue ~299, chroma ~48, tone ~41.
        let hct = Hct::from_argb(Argb::from_rgb(103, 80, 164));
        assert!((hct.hue() - 299.0).abs() < 3.0, "hue: {}", hct.hue());
        assert!((hct.chroma() - 48.0).abs() < 4.0, "chroma: {}", hct.chroma());
        assert!((hct.tone() - 41.4).abs() < 1.0, "tone: {}", hct.tone());
    }

    #[test]
    fn gray_short_circuits() {
        let gray = Hct::new(0.0, 0.0, 50.0);
        let argb = gray.to_argb();
        assert_eq!(argb.red, argb.green);
        assert_eq!(argb.green, argb.blue);
        assert!((gray.tone() - 50.0).abs() < 0.5);
    }

    #[test]
    fn tone_extremes_are_black_and_white() {
        assert_eq!(Hct::new(120.0, 60.0, 0.0).to_argb(), Argb::from_rgb(0, 0, 0));
        assert_eq!(
            Hct::new(120.0, 60.0, 100.0).to_argb(),
            Argb::from_rgb(255, 255, 255)
        );
    }

    #[test]
    fn out_of_range_tone_clamps() {
        assert_eq!(Hct::new(120.0, 60.0, -10.0).to_argb(), Argb::from_rgb(0, 0, 0));
        assert_eq!(
            Hct::new(120.0, 60.0, 110.0).to_argb(),
            Argb::from_rgb(255, 255, 255)
        );
    }

    #[test]
    fn round_trip_preserves_appearance() {
        // For every achievable request: tone within 0.5, hue within 4°,
        // chroma never exceeding the request by more than 2.5.
        let mut hue = 15.0;
        while hue < 360.0 {
            for chroma in [20.0, 40.0, 60.0] {
                for tone in [25.0, 40.0, 55.0, 70.0] {
                    let hct = Hct::new(hue, chroma, tone);
                    if hct.chroma() > 0.5 {
                        assert!(
                            hue_distance(hct.hue(), hue) <= 4.0,
                            "hue drifted: requested {hue}, got {} (c={chroma}, t={tone})",
                            hct.hue()
                        );
                    }
                    assert!(
                        hct.chroma() <= chroma + 2.5,
                        "chroma overshot: requested {chroma}, got {} (h={hue}, t={tone})",
                        hct.chroma()
                    );
                    assert!(
                        (hct.tone() - tone).abs() <= 0.5,
                        "tone drifted: requested {tone}, got {} (h={hue}, c={chroma})",
                        hct.tone()
                    );
                }
            }
            hue += 30.0;
        }
    }

    #[test]
    fn near_extreme_tones_keep_achievable_chroma() {
        // A pale yellow sits above tone 99 yet is clearly not gray; the
        // solver must search there rather than collapse to white.
        let pale = Hct::from_argb(Argb::from_rgb(255, 255, 240));
        assert!(pale.tone() > 99.0, "tone: {}", pale.tone());
        assert!(pale.chroma() > 1.0, "chroma: {}", pale.chroma());

        let resolved = Hct::new(pale.hue(), pale.chroma(), pale.tone());
        let argb = resolved.to_argb();
        assert!(
            argb.red != argb.blue || argb.green != argb.blue,
            "resolved to gray: {argb:?}"
        );
        assert!((resolved.tone() - pale.tone()).abs() <= 0.5, "tone: {}", resolved.tone());
    }

    #[test]
    fn impossible_chroma_is_reduced_not_rejected() {
        // No display shows chroma 200; the solver must still terminate with
        // the right hue and tone.
        let hct = Hct::new(120.0, 200.0, 50.0);
        assert!(hct.chroma() < 200.0);
        assert!(hct.chroma() > 10.0, "should keep some chroma: {}", hct.chroma());
        assert!(hue_distance(hct.hue(), 120.0) <= 4.0, "hue: {}", hct.hue());
        assert!((hct.tone() - 50.0).abs() <= 0.5, "tone: {}", hct.tone());
    }

    #[test]
    fn from_argb_round_trips_exactly() {
        for argb in [
            Argb::from_rgb(103, 80, 164),
            Argb::from_rgb(250, 30, 30),
            Argb::from_rgb(20, 120, 80),
        ] {
            let hct = Hct::from_argb(argb);
            let back = Hct::new(hct.hue(), hct.chroma(), hct.tone());
            assert!(
                (back.tone() - hct.tone()).abs() <= 0.5,
                "tone mismatch for {argb:?}"
            );
            assert!(
                hue_distance(back.hue(), hct.hue()) <= 4.0,
                "hue mismatch for {argb:?}"
            );
        }
    }

    #[test]
    fn with_tone_moves_only_tone() {
        let base = Hct::from_argb(Argb::from_rgb(103, 80, 164));
        let lighter = base.with_tone(90.0);
        assert!((lighter.tone() - 90.0).abs() <= 0.5);
        assert!(hue_distance(lighter.hue(), base.hue()) <= 4.0);
    }

    #[test]
    fn tone_fast_path_matches_full_transform() {
        let argb = Argb::from_rgb(103, 80, 164);
        assert!((tone_from_argb(argb) - Hct::from_argb(argb).tone()).abs() < 1e-9);
    }
}
