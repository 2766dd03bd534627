//! Scheme construction and role resolution.
//!
//! A [`DynamicScheme`] fixes the four inputs every role tone depends on —
//! seed color, variant, dark/light mode, and the contrast dial — plus the
//! six palettes the variant derives from the seed. Resolution walks the
//! role table: baseline tone from the role's formula, then contrast
//! adjustment against the role's background, then delta-pair separation,
//! then a dodge out of the ambiguous 50–59 tone band for roles that serve
//! as backgrounds. Tones are memoized per scheme, so each role is solved
//! at most once no matter how many roles depend on it.

use std::sync::{Arc, OnceLock};

use crate::color::Argb;
use crate::contrast;
use crate::hct::Hct;
use crate::palette::TonalPalette;
use crate::role::{PaletteSlot, Role, RoleRegistry, RoleSpec, ToneDeltaPair};
use crate::roles;
use crate::variant::{CorePalettes, Variant};

// ── Foreground selection ────────────────────────────────────────────────

/// Whether text on this tone should lean light. Mid tones read better with
/// light foregrounds even when a dark one would technically contrast more.
#[must_use]
pub fn tone_prefers_light_foreground(tone: f64) -> bool {
    tone.round() < 60.0
}

/// The foreground tone for a background, aiming for `ratio` against it.
/// Picks the lighter or darker candidate per the background's preference,
/// falling back to whichever side actually contrasts more when the
/// preferred side cannot reach the ratio.
#[must_use]
pub fn foreground_tone(bg_tone: f64, ratio: f64) -> f64 {
    let lighter_tone = contrast::lighter_unsafe(bg_tone, ratio);
    let darker_tone = contrast::darker_unsafe(bg_tone, ratio);
    let lighter_ratio = contrast::ratio_of_tones(lighter_tone, bg_tone);
    let darker_ratio = contrast::ratio_of_tones(darker_tone, bg_tone);

    if tone_prefers_light_foreground(bg_tone) {
        // Near the preference boundary both sides can fall just short of
        // the ratio; stay light rather than flip on a rounding artifact.
        let negligible_difference = (lighter_ratio - darker_ratio).abs() < 0.1
            && lighter_ratio < ratio
            && darker_ratio < ratio;
        if lighter_ratio >= ratio || lighter_ratio >= darker_ratio || negligible_difference {
            lighter_tone
        } else {
            darker_tone
        }
    } else if darker_ratio >= ratio || darker_ratio >= lighter_ratio {
        darker_tone
    } else {
        lighter_tone
    }
}

// ── Scheme ──────────────────────────────────────────────────────────────

/// A resolved color scheme: seed, mode, contrast dial, palettes, and a
/// per-role tone cache. Cheap to query; every tone is computed once.
#[derive(Debug)]
pub struct DynamicScheme {
    source: Hct,
    variant: Variant,
    is_dark: bool,
    contrast_level: f64,
    palettes: CorePalettes,
    registry: Arc<RoleRegistry>,
    tones: Box<[OnceLock<f64>]>,
}

impl DynamicScheme {
    /// A scheme over the builtin role table.
    #[must_use]
    pub fn new(source: Argb, variant: Variant, is_dark: bool, contrast_level: f64) -> Self {
        Self::with_registry(source, variant, is_dark, contrast_level, roles::builtin())
    }

    /// A scheme over a caller-validated role table.
    #[must_use]
    pub fn with_registry(
        source: Argb,
        variant: Variant,
        is_dark: bool,
        contrast_level: f64,
        registry: Arc<RoleRegistry>,
    ) -> Self {
        let seed = Hct::from_argb(source);
        let palettes = variant.palettes(seed);
        Self::with_palettes(seed, variant, is_dark, contrast_level, palettes, registry)
    }

    /// A scheme from pre-built palettes, bypassing the variant's palette
    /// derivation.
    #[must_use]
    pub fn with_palettes(
        source: Hct,
        variant: Variant,
        is_dark: bool,
        contrast_level: f64,
        palettes: CorePalettes,
        registry: Arc<RoleRegistry>,
    ) -> Self {
        Self {
            source,
            variant,
            is_dark,
            contrast_level,
            palettes,
            registry,
            tones: (0..Role::COUNT).map(|_| OnceLock::new()).collect(),
        }
    }

    /// The seed color, as achieved in gamut.
    #[must_use]
    pub const fn source(&self) -> Hct {
        self.source
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// The contrast dial position. Nominally in [−1, 1]; values beyond
    /// saturate through the contrast curves rather than being rejected.
    #[must_use]
    pub const fn contrast_level(&self) -> f64 {
        self.contrast_level
    }

    /// The palette behind a slot.
    #[must_use]
    pub const fn palette(&self, slot: PaletteSlot) -> TonalPalette {
        match slot {
            PaletteSlot::Primary => self.palettes.primary,
            PaletteSlot::Secondary => self.palettes.secondary,
            PaletteSlot::Tertiary => self.palettes.tertiary,
            PaletteSlot::Neutral => self.palettes.neutral,
            PaletteSlot::NeutralVariant => self.palettes.neutral_variant,
            PaletteSlot::Error => self.palettes.error,
        }
    }

    // ── Resolution ──────────────────────────────────────────────────

    /// The resolved tone for a role. Memoized; the first query of a role
    /// may resolve the roles it depends on.
    #[must_use]
    pub fn tone(&self, role: Role) -> f64 {
        *self.tones[role.index()].get_or_init(|| self.compute_tone(role))
    }

    /// The resolved color for a role: its palette at its resolved tone.
    #[must_use]
    pub fn resolve(&self, role: Role) -> Argb {
        let spec = self.registry.spec(role);
        self.palette(spec.palette).tone(self.tone(role))
    }

    /// Resolve a role by its string name.
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> Option<Argb> {
        Role::from_name(name).map(|role| self.resolve(role))
    }

    /// Every role's resolved color, in table order.
    #[must_use]
    pub fn colors(&self) -> Vec<(Role, Argb)> {
        Role::ALL
            .iter()
            .map(|role| (*role, self.resolve(*role)))
            .collect()
    }

    fn compute_tone(&self, role: Role) -> f64 {
        let spec = self.registry.spec(role);
        if let Some(pair) = spec.pair {
            return self.pair_tone(spec, pair);
        }

        let mut answer = (spec.tone)(self);
        let (Some(background), Some(curve)) = (spec.background, spec.curve) else {
            return answer;
        };
        let bg_tone = self.tone(background.resolve(self.is_dark));
        let desired = curve.get(self.contrast_level);

        if spec.exact {
            // Land as close to the required ratio as the tone grid allows
            // instead of keeping a higher-contrast baseline.
            answer = contrast::tone_for_ratio(bg_tone, desired, answer >= bg_tone).tone;
        } else if contrast::ratio_of_tones(bg_tone, answer) < desired || self.contrast_level < 0.0
        {
            answer = foreground_tone(bg_tone, desired);
        }

        if spec.is_background && (50.0..60.0).contains(&answer) {
            // The 50–59 band is ambiguous for foreground selection; snap
            // to whichever edge keeps the required contrast.
            answer = if contrast::ratio_of_tones(49.0, bg_tone) >= desired {
                49.0
            } else {
                60.0
            };
        }
        answer
    }

    /// Joint resolution for a delta pair: solve both members against the
    /// shared background, then enforce the tone separation, preferring to
    /// push the farther member outward. A push that would drop a member
    /// below its reduced-contrast floor against the background is skipped;
    /// legibility outranks separation.
    fn pair_tone(&self, spec: &RoleSpec, pair: ToneDeltaPair) -> f64 {
        let partner = self.registry.spec(pair.partner);
        let self_is_nearer = pair.polarity.is_nearer(self.is_dark);
        let (nearer, farther) = if self_is_nearer {
            (spec, partner)
        } else {
            (partner, spec)
        };

        let (Some(background), Some(n_curve), Some(f_curve)) =
            (spec.background, nearer.curve, farther.curve)
        else {
            return (spec.tone)(self);
        };

        // Dark schemes expand tones upward, light schemes downward.
        let expansion = if self.is_dark { 1.0 } else { -1.0 };
        let bg_tone = self.tone(background.resolve(self.is_dark));
        let n_desired = n_curve.get(self.contrast_level);
        let f_desired = f_curve.get(self.contrast_level);

        let n_initial = (nearer.tone)(self);
        let f_initial = (farther.tone)(self);
        let mut n_tone = if contrast::ratio_of_tones(bg_tone, n_initial) >= n_desired {
            n_initial
        } else {
            foreground_tone(bg_tone, n_desired)
        };
        let mut f_tone = if contrast::ratio_of_tones(bg_tone, f_initial) >= f_desired {
            f_initial
        } else {
            foreground_tone(bg_tone, f_desired)
        };
        if self.contrast_level < 0.0 {
            n_tone = foreground_tone(bg_tone, n_desired);
            f_tone = foreground_tone(bg_tone, f_desired);
        }

        if (f_tone - n_tone) * expansion < pair.delta {
            let f_floor = f_curve.get(self.contrast_level.min(0.0));
            let pushed = pair.delta.mul_add(expansion, n_tone).clamp(0.0, 100.0);
            if contrast::ratio_of_tones(bg_tone, pushed) >= f_floor {
                f_tone = pushed;
            }
            if (f_tone - n_tone) * expansion < pair.delta {
                let n_floor = n_curve.get(self.contrast_level.min(0.0));
                let pulled = (-pair.delta).mul_add(expansion, f_tone).clamp(0.0, 100.0);
                if contrast::ratio_of_tones(bg_tone, pulled) >= n_floor {
                    n_tone = pulled;
                }
            }
        }

        if (50.0..60.0).contains(&n_tone) {
            (n_tone, f_tone) = dodge_band_together(f_tone, pair.delta, expansion);
        } else if (50.0..60.0).contains(&f_tone) {
            if pair.stay_together {
                (n_tone, f_tone) = dodge_band_together(f_tone, pair.delta, expansion);
            } else {
                f_tone = if expansion > 0.0 { 60.0 } else { 49.0 };
            }
        }

        if self_is_nearer { n_tone } else { f_tone }
    }
}

/// Move the nearer member out of the 50–59 band and drag the farther one
/// along so the separation survives.
fn dodge_band_together(f_tone: f64, delta: f64, expansion: f64) -> (f64, f64) {
    if expansion > 0.0 {
        let nearer = 60.0;
        (nearer, f_tone.max(delta.mul_add(expansion, nearer)))
    } else {
        let nearer = 49.0;
        (nearer, f_tone.min(delta.mul_add(expansion, nearer)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
