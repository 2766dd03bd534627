//! The builtin role table.
//!
//! One [`RoleSpec`] per [`Role`], written as data: baseline tones per mode,
//! contrast curves against each role's background, and the delta pairs that
//! keep accents separated from their containers. Monochrome schemes take
//! different baselines for the accent roles; every other variant shares the
//! same table because variants differ only in the palettes they build.

use std::sync::{Arc, LazyLock};

use crate::role::{
    Background, ContrastCurve, PaletteSlot, Role, RoleRegistry, RoleSpec, ToneDeltaPair,
    TonePolarity,
};
use crate::scheme::DynamicScheme;
use crate::variant::Variant;

// ── Tone formula helpers ────────────────────────────────────────────────

fn mode(scheme: &DynamicScheme, dark: f64, light: f64) -> f64 {
    if scheme.is_dark() { dark } else { light }
}

fn mono(
    scheme: &DynamicScheme,
    mono_dark: f64,
    mono_light: f64,
    dark: f64,
    light: f64,
) -> f64 {
    if scheme.variant() == Variant::Monochrome {
        mode(scheme, mono_dark, mono_light)
    } else {
        mode(scheme, dark, light)
    }
}

// Accent ↔ container separation used throughout the table.
const ACCENT_DELTA: f64 = 10.0;

const fn nearer(partner: Role) -> ToneDeltaPair {
    ToneDeltaPair {
        partner,
        delta: ACCENT_DELTA,
        polarity: TonePolarity::Nearer,
        stay_together: false,
    }
}

const fn farther(partner: Role) -> ToneDeltaPair {
    ToneDeltaPair {
        partner,
        delta: ACCENT_DELTA,
        polarity: TonePolarity::Farther,
        stay_together: false,
    }
}

// Curves shared across the table.
const ON_ACCENT: ContrastCurve = ContrastCurve::new(4.5, 7.0, 11.0, 21.0);
const ACCENT: ContrastCurve = ContrastCurve::new(3.0, 4.5, 7.0, 7.0);
const CONTAINER: ContrastCurve = ContrastCurve::new(1.0, 1.0, 3.0, 4.5);

// ── Table ───────────────────────────────────────────────────────────────

/// The builtin table as a plain spec list, for callers that want to tweak
/// a handful of roles and validate the result themselves.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn table() -> Vec<RoleSpec> {
    use Background::HighestSurface;
    use PaletteSlot::{Error as ErrorSlot, Neutral, NeutralVariant, Primary, Secondary, Tertiary};

    let on = Background::Role;

    vec![
        // ── Surfaces ────────────────────────────────────────────────
        RoleSpec::new(Role::Background, Neutral, |s| mode(s, 6.0, 98.0)).as_background(),
        RoleSpec::new(Role::OnBackground, Neutral, |s| mode(s, 90.0, 10.0))
            .with_background(on(Role::Background), ContrastCurve::new(3.0, 3.0, 4.5, 7.0)),
        RoleSpec::new(Role::Surface, Neutral, |s| mode(s, 6.0, 98.0)).as_background(),
        RoleSpec::new(Role::SurfaceDim, Neutral, |s| mode(s, 6.0, 87.0)).as_background(),
        RoleSpec::new(Role::SurfaceBright, Neutral, |s| mode(s, 24.0, 98.0)).as_background(),
        RoleSpec::new(Role::SurfaceContainerLowest, Neutral, |s| mode(s, 4.0, 100.0))
            .as_background(),
        RoleSpec::new(Role::SurfaceContainerLow, Neutral, |s| mode(s, 10.0, 96.0))
            .as_background(),
        RoleSpec::new(Role::SurfaceContainer, Neutral, |s| mode(s, 12.0, 94.0)).as_background(),
        RoleSpec::new(Role::SurfaceContainerHigh, Neutral, |s| mode(s, 17.0, 92.0))
            .as_background(),
        RoleSpec::new(Role::SurfaceContainerHighest, Neutral, |s| mode(s, 22.0, 90.0))
            .as_background(),
        RoleSpec::new(Role::OnSurface, Neutral, |s| mode(s, 90.0, 10.0))
            .with_background(HighestSurface, ON_ACCENT),
        RoleSpec::new(Role::SurfaceVariant, NeutralVariant, |s| mode(s, 30.0, 90.0))
            .as_background(),
        RoleSpec::new(Role::OnSurfaceVariant, NeutralVariant, |s| mode(s, 80.0, 30.0))
            .with_background(HighestSurface, ContrastCurve::new(3.0, 4.5, 7.0, 11.0)),
        RoleSpec::new(Role::InverseSurface, Neutral, |s| mode(s, 90.0, 20.0)),
        RoleSpec::new(Role::InverseOnSurface, Neutral, |s| mode(s, 20.0, 95.0))
            .with_background(on(Role::InverseSurface), ON_ACCENT),
        RoleSpec::new(Role::Outline, NeutralVariant, |s| mode(s, 60.0, 50.0))
            .with_background(HighestSurface, ContrastCurve::new(1.5, 3.0, 4.5, 7.0)),
        RoleSpec::new(Role::OutlineVariant, NeutralVariant, |s| mode(s, 30.0, 80.0))
            .with_background(HighestSurface, CONTAINER),
        RoleSpec::new(Role::Shadow, Neutral, |_| 0.0),
        RoleSpec::new(Role::Scrim, Neutral, |_| 0.0),
        RoleSpec::new(Role::SurfaceTint, Primary, |s| mode(s, 80.0, 40.0)).as_background(),
        // ── Primary ─────────────────────────────────────────────────
        RoleSpec::new(Role::Primary, Primary, |s| mono(s, 100.0, 0.0, 80.0, 40.0))
            .with_background(HighestSurface, ACCENT)
            .with_pair(farther(Role::PrimaryContainer))
            .as_background(),
        RoleSpec::new(Role::OnPrimary, Primary, |s| mono(s, 10.0, 90.0, 20.0, 100.0))
            .with_background(on(Role::Primary), ON_ACCENT),
        RoleSpec::new(Role::PrimaryContainer, Primary, |s| mono(s, 85.0, 25.0, 30.0, 90.0))
            .with_background(HighestSurface, CONTAINER)
            .with_pair(nearer(Role::Primary))
            .as_background(),
        RoleSpec::new(Role::OnPrimaryContainer, Primary, |s| mono(s, 0.0, 100.0, 90.0, 30.0))
            .with_background(on(Role::PrimaryContainer), ON_ACCENT),
        RoleSpec::new(Role::InversePrimary, Primary, |s| mode(s, 40.0, 80.0))
            .with_background(on(Role::InverseSurface), ACCENT),
        // ── Secondary ───────────────────────────────────────────────
        RoleSpec::new(Role::Secondary, Secondary, |s| mode(s, 80.0, 40.0))
            .with_background(HighestSurface, ACCENT)
            .with_pair(farther(Role::SecondaryContainer))
            .as_background(),
        RoleSpec::new(Role::OnSecondary, Secondary, |s| mono(s, 10.0, 100.0, 20.0, 100.0))
            .with_background(on(Role::Secondary), ON_ACCENT),
        RoleSpec::new(Role::SecondaryContainer, Secondary, |s| mono(s, 30.0, 85.0, 30.0, 90.0))
            .with_background(HighestSurface, CONTAINER)
            .with_pair(nearer(Role::Secondary))
            .as_background(),
        RoleSpec::new(Role::OnSecondaryContainer, Secondary, |s| {
            mono(s, 90.0, 10.0, 90.0, 30.0)
        })
        .with_background(on(Role::SecondaryContainer), ON_ACCENT),
        // ── Tertiary ────────────────────────────────────────────────
        RoleSpec::new(Role::Tertiary, Tertiary, |s| mono(s, 90.0, 25.0, 80.0, 40.0))
            .with_background(HighestSurface, ACCENT)
            .with_pair(farther(Role::TertiaryContainer))
            .as_background(),
        RoleSpec::new(Role::OnTertiary, Tertiary, |s| mono(s, 10.0, 90.0, 20.0, 100.0))
            .with_background(on(Role::Tertiary), ON_ACCENT),
        RoleSpec::new(Role::TertiaryContainer, Tertiary, |s| mono(s, 60.0, 49.0, 30.0, 90.0))
            .with_background(HighestSurface, CONTAINER)
            .with_pair(nearer(Role::Tertiary))
            .as_background(),
        RoleSpec::new(Role::OnTertiaryContainer, Tertiary, |s| mono(s, 0.0, 100.0, 90.0, 30.0))
            .with_background(on(Role::TertiaryContainer), ON_ACCENT),
        // ── Error ───────────────────────────────────────────────────
        RoleSpec::new(Role::Error, ErrorSlot, |s| mode(s, 80.0, 40.0))
            .with_background(HighestSurface, ACCENT)
            .with_pair(farther(Role::ErrorContainer))
            .as_background(),
        RoleSpec::new(Role::OnError, ErrorSlot, |s| mode(s, 20.0, 100.0))
            .with_background(on(Role::Error), ON_ACCENT),
        RoleSpec::new(Role::ErrorContainer, ErrorSlot, |s| mode(s, 30.0, 90.0))
            .with_background(HighestSurface, CONTAINER)
            .with_pair(nearer(Role::Error))
            .as_background(),
        RoleSpec::new(Role::OnErrorContainer, ErrorSlot, |s| mono(s, 90.0, 10.0, 90.0, 30.0))
            .with_background(on(Role::ErrorContainer), ON_ACCENT),
    ]
}

static BUILTIN: LazyLock<Arc<RoleRegistry>> = LazyLock::new(|| {
    // The table above is validated at first use; it is a compile-time
    // constant in all but mechanism, so a failure here is a bug in this
    // module, not a runtime condition.
    Arc::new(RoleRegistry::new(table()).expect("builtin role table is valid"))
});

/// The shared builtin registry.
#[must_use]
pub fn builtin() -> Arc<RoleRegistry> {
    Arc::clone(&BUILTIN)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RegistryError;

    #[test]
    fn builtin_table_validates() {
        let registry = builtin();
        for role in Role::ALL {
            assert_eq!(registry.spec(*role).role, *role);
        }
    }

    #[test]
    fn builtin_pairs_are_symmetric() {
        let registry = builtin();
        for role in Role::ALL {
            let Some(pair) = registry.spec(*role).pair else {
                continue;
            };
            let back = registry
                .spec(pair.partner)
                .pair
                .unwrap_or_else(|| panic!("{} pair is one-sided", role.name()));
            assert_eq!(back.partner, *role);
            assert_eq!(back.polarity, pair.polarity.mirrored());
        }
    }

    #[test]
    fn missing_role_is_rejected() {
        let mut specs = table();
        specs.retain(|spec| spec.role != Role::Outline);
        assert_eq!(
            RoleRegistry::new(specs).unwrap_err(),
            RegistryError::Coverage("outline"),
        );
    }

    #[test]
    fn duplicate_role_is_rejected() {
        let mut specs = table();
        specs.push(RoleSpec::new(Role::Shadow, PaletteSlot::Neutral, |_| 0.0));
        assert_eq!(
            RoleRegistry::new(specs).unwrap_err(),
            RegistryError::Coverage("shadow"),
        );
    }

    #[test]
    fn one_sided_pair_is_rejected() {
        let mut specs = table();
        for spec in &mut specs {
            if spec.role == Role::PrimaryContainer {
                spec.pair = None;
            }
        }
        assert_eq!(
            RoleRegistry::new(specs).unwrap_err(),
            RegistryError::UnmatchedPair("primary", "primaryContainer"),
        );
    }

    #[test]
    fn background_cycle_is_rejected() {
        let mut specs = table();
        for spec in &mut specs {
            // Point the surface chain back at a role that sits on it.
            if spec.role == Role::SurfaceBright {
                spec.background = Some(Background::Role(Role::OnSurface));
                spec.curve = Some(ContrastCurve::new(1.0, 1.0, 1.0, 1.0));
            }
        }
        assert!(matches!(
            RoleRegistry::new(specs).unwrap_err(),
            RegistryError::Cycle(_),
        ));
    }

    #[test]
    fn self_background_is_a_cycle() {
        let mut specs = table();
        for spec in &mut specs {
            if spec.role == Role::Outline {
                spec.background = Some(Background::Role(Role::Outline));
            }
        }
        assert_eq!(
            RoleRegistry::new(specs).unwrap_err(),
            RegistryError::Cycle("outline"),
        );
    }

    #[test]
    fn accents_are_marked_as_backgrounds() {
        let registry = builtin();
        for role in [
            Role::Primary,
            Role::PrimaryContainer,
            Role::Secondary,
            Role::SecondaryContainer,
            Role::Tertiary,
            Role::TertiaryContainer,
            Role::Error,
            Role::ErrorContainer,
            Role::Surface,
            Role::SurfaceTint,
        ] {
            assert!(registry.spec(role).is_background, "{}", role.name());
        }
    }
}
