//! Declarative color roles.
//!
//! A role is a named purpose a color serves in a UI ("primary",
//! "onSurfaceVariant", ...). Each role is described once, process-wide, by
//! a [`RoleSpec`]: which palette it draws from, a formula for its baseline
//! tone, an optional background role it must contrast against (with a
//! [`ContrastCurve`] giving the required ratio per contrast level), and an
//! optional [`ToneDeltaPair`] tying it to a sibling role.
//!
//! Specs are data, not behavior — the resolution algorithm lives in
//! [`crate::scheme`]. A [`RoleRegistry`] collects one spec per role and
//! validates the whole table at build time: background references must be
//! acyclic and delta pairs must be declared symmetrically. A bad table is
//! a fatal configuration error; no scheme can be constructed against it.

use thiserror::Error;

use crate::scheme::DynamicScheme;

// ── Role ────────────────────────────────────────────────────────────────

macro_rules! roles {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Every named role a scheme can resolve. Closed enumeration; the
        /// string names are the stable external identifiers.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Role {
            $($variant,)+
        }

        impl Role {
            /// All roles, in resolution-friendly display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// The number of roles.
            pub const COUNT: usize = Self::ALL.len();

            /// The stable string identifier for this role.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Look a role up by its string identifier.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

roles! {
    Background => "background",
    OnBackground => "onBackground",
    Surface => "surface",
    SurfaceDim => "surfaceDim",
    SurfaceBright => "surfaceBright",
    SurfaceContainerLowest => "surfaceContainerLowest",
    SurfaceContainerLow => "surfaceContainerLow",
    SurfaceContainer => "surfaceContainer",
    SurfaceContainerHigh => "surfaceContainerHigh",
    SurfaceContainerHighest => "surfaceContainerHighest",
    OnSurface => "onSurface",
    SurfaceVariant => "surfaceVariant",
    OnSurfaceVariant => "onSurfaceVariant",
    InverseSurface => "inverseSurface",
    InverseOnSurface => "inverseOnSurface",
    Outline => "outline",
    OutlineVariant => "outlineVariant",
    Shadow => "shadow",
    Scrim => "scrim",
    SurfaceTint => "surfaceTint",
    Primary => "primary",
    OnPrimary => "onPrimary",
    PrimaryContainer => "primaryContainer",
    OnPrimaryContainer => "onPrimaryContainer",
    InversePrimary => "inversePrimary",
    Secondary => "secondary",
    OnSecondary => "onSecondary",
    SecondaryContainer => "secondaryContainer",
    OnSecondaryContainer => "onSecondaryContainer",
    Tertiary => "tertiary",
    OnTertiary => "onTertiary",
    TertiaryContainer => "tertiaryContainer",
    OnTertiaryContainer => "onTertiaryContainer",
    Error => "error",
    OnError => "onError",
    ErrorContainer => "errorContainer",
    OnErrorContainer => "onErrorContainer",
}

impl Role {
    /// Dense index for per-role caches and tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ── Palette slot ────────────────────────────────────────────────────────

/// Which of a scheme's six palettes a role draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSlot {
    Primary,
    Secondary,
    Tertiary,
    Neutral,
    NeutralVariant,
    Error,
}

// ── Contrast curve ──────────────────────────────────────────────────────

/// Required contrast ratios at the four anchor contrast levels −1 (reduced),
/// 0 (standard), 0.5 (medium), and 1 (high); intermediate dial positions
/// interpolate linearly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastCurve {
    pub low: f64,
    pub normal: f64,
    pub medium: f64,
    pub high: f64,
}

impl ContrastCurve {
    /// A curve from its four anchors.
    #[must_use]
    pub const fn new(low: f64, normal: f64, medium: f64, high: f64) -> Self {
        Self { low, normal, medium, high }
    }

    /// The required ratio at a contrast level. Levels outside [−1, 1]
    /// saturate at the end anchors.
    #[must_use]
    pub fn get(&self, contrast_level: f64) -> f64 {
        if contrast_level <= -1.0 {
            self.low
        } else if contrast_level < 0.0 {
            lerp(self.low, self.normal, contrast_level + 1.0)
        } else if contrast_level < 0.5 {
            lerp(self.normal, self.medium, contrast_level / 0.5)
        } else if contrast_level < 1.0 {
            lerp(self.medium, self.high, (contrast_level - 0.5) / 0.5)
        } else {
            self.high
        }
    }
}

fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (stop - start).mul_add(amount, start)
}

// ── Tone delta pair ─────────────────────────────────────────────────────

/// This role's position in a delta pair, relative to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TonePolarity {
    /// This role sits nearer the surface than its partner.
    Nearer,
    /// This role sits farther from the surface than its partner.
    Farther,
    /// This role is the lighter of the two.
    Lighter,
    /// This role is the darker of the two.
    Darker,
}

impl TonePolarity {
    /// Whether a role with this polarity is the "nearer" member in the
    /// given mode. Lighter/darker polarities flip with the mode because
    /// dark schemes expand tones upward and light schemes downward.
    #[must_use]
    pub const fn is_nearer(self, is_dark: bool) -> bool {
        match self {
            Self::Nearer => true,
            Self::Farther => false,
            Self::Lighter => !is_dark,
            Self::Darker => is_dark,
        }
    }

    /// The polarity the partner role must declare.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Nearer => Self::Farther,
            Self::Farther => Self::Nearer,
            Self::Lighter => Self::Darker,
            Self::Darker => Self::Lighter,
        }
    }
}

/// A constraint keeping this role's tone a fixed distance from a partner
/// role's tone — used when contrast against an adjacent container matters
/// as much as contrast against the background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneDeltaPair {
    /// The sibling role this one is paired with.
    pub partner: Role,
    /// Minimum tone distance between the two.
    pub delta: f64,
    /// This role's position in the pair.
    pub polarity: TonePolarity,
    /// Whether the two roles move as a unit when dodging the 50–59 band.
    pub stay_together: bool,
}

// ── Background reference ────────────────────────────────────────────────

/// The background a role is required to contrast against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// A fixed role.
    Role(Role),
    /// The lightest surface in dark mode, the dimmest in light mode —
    /// whichever surface the role could plausibly sit on.
    HighestSurface,
}

impl Background {
    /// The concrete background role for a scheme mode.
    #[must_use]
    pub const fn resolve(self, is_dark: bool) -> Role {
        match self {
            Self::Role(role) => role,
            Self::HighestSurface => {
                if is_dark {
                    Role::SurfaceBright
                } else {
                    Role::SurfaceDim
                }
            }
        }
    }

    /// Every role this reference can resolve to, across both modes.
    #[must_use]
    pub fn candidates(self) -> [Role; 2] {
        [self.resolve(true), self.resolve(false)]
    }
}

// ── Role spec ───────────────────────────────────────────────────────────

/// A tone formula: baseline tone from the scheme's mode, contrast level,
/// and variant. Pure; must not resolve other roles.
pub type ToneFormula = fn(&DynamicScheme) -> f64;

/// The complete declarative description of one role.
#[derive(Debug, Clone, Copy)]
pub struct RoleSpec {
    /// Which role this spec describes.
    pub role: Role,
    /// The palette the resolved tone is colored from.
    pub palette: PaletteSlot,
    /// Baseline tone formula.
    pub tone: ToneFormula,
    /// Background the role must contrast against, if any.
    pub background: Option<Background>,
    /// Required contrast against the background, per contrast level.
    pub curve: Option<ContrastCurve>,
    /// Delta-pair constraint, if any.
    pub pair: Option<ToneDeltaPair>,
    /// Hit the curve's ratio as closely as possible instead of treating it
    /// as a floor.
    pub exact: bool,
    /// Whether other roles may use this one as a background (such roles
    /// dodge the ambiguous 50–59 tone band).
    pub is_background: bool,
}

impl RoleSpec {
    /// A spec with only a palette and a tone formula; the optional parts
    /// are filled in by the builder-style methods below.
    #[must_use]
    pub const fn new(role: Role, palette: PaletteSlot, tone: ToneFormula) -> Self {
        Self {
            role,
            palette,
            tone,
            background: None,
            curve: None,
            pair: None,
            exact: false,
            is_background: false,
        }
    }

    #[must_use]
    pub const fn with_background(mut self, background: Background, curve: ContrastCurve) -> Self {
        self.background = Some(background);
        self.curve = Some(curve);
        self
    }

    #[must_use]
    pub const fn with_pair(mut self, pair: ToneDeltaPair) -> Self {
        self.pair = Some(pair);
        self
    }

    #[must_use]
    pub const fn exact_contrast(mut self) -> Self {
        self.exact = true;
        self
    }

    #[must_use]
    pub const fn as_background(mut self) -> Self {
        self.is_background = true;
        self
    }
}

// ── Registry ────────────────────────────────────────────────────────────

/// A fatal configuration error in a role table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A role's background chain loops back onto itself.
    #[error("background dependency cycle through role \"{0}\"")]
    Cycle(&'static str),
    /// A role appears twice or not at all in the table.
    #[error("role table must describe \"{0}\" exactly once")]
    Coverage(&'static str),
    /// A delta pair is declared on one role but not mirrored by its
    /// partner.
    #[error("tone delta pair on \"{0}\" is not mirrored by \"{1}\"")]
    UnmatchedPair(&'static str, &'static str),
}

/// The validated, read-only table of every role's spec. Built once,
/// shared by every scheme resolved against it.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    specs: Vec<RoleSpec>,
}

impl RoleRegistry {
    /// Validate a role table. Fails on missing/duplicate roles, background
    /// cycles, and one-sided delta pairs — all at build time, never during
    /// resolution.
    pub fn new(specs: Vec<RoleSpec>) -> Result<Self, RegistryError> {
        let mut ordered: Vec<Option<RoleSpec>> = vec![None; Role::COUNT];
        for spec in specs {
            let slot = &mut ordered[spec.role.index()];
            if slot.is_some() {
                return Err(RegistryError::Coverage(spec.role.name()));
            }
            *slot = Some(spec);
        }
        let mut table = Vec::with_capacity(Role::COUNT);
        for (index, slot) in ordered.into_iter().enumerate() {
            match slot {
                Some(spec) => table.push(spec),
                None => return Err(RegistryError::Coverage(Role::ALL[index].name())),
            }
        }

        let registry = Self { specs: table };
        registry.check_pairs()?;
        registry.check_cycles()?;
        Ok(registry)
    }

    /// The spec for a role.
    #[must_use]
    pub fn spec(&self, role: Role) -> &RoleSpec {
        &self.specs[role.index()]
    }

    fn check_pairs(&self) -> Result<(), RegistryError> {
        for spec in &self.specs {
            let Some(pair) = spec.pair else { continue };
            let partner = self.spec(pair.partner);
            let mirrored = partner.pair.is_some_and(|back| {
                back.partner == spec.role
                    && (back.delta - pair.delta).abs() < 1e-9
                    && back.stay_together == pair.stay_together
                    && back.polarity == pair.polarity.mirrored()
            });
            if !mirrored {
                return Err(RegistryError::UnmatchedPair(
                    spec.role.name(),
                    pair.partner.name(),
                ));
            }
        }
        Ok(())
    }

    fn check_cycles(&self) -> Result<(), RegistryError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(
            registry: &RoleRegistry,
            marks: &mut [Mark],
            role: Role,
        ) -> Result<(), RegistryError> {
            match marks[role.index()] {
                Mark::Done => return Ok(()),
                Mark::InProgress => return Err(RegistryError::Cycle(role.name())),
                Mark::Unvisited => {}
            }
            marks[role.index()] = Mark::InProgress;
            if let Some(background) = registry.spec(role).background {
                for candidate in background.candidates() {
                    visit(registry, marks, candidate)?;
                }
            }
            marks[role.index()] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; Role::COUNT];
        for role in Role::ALL {
            visit(self, &mut marks, *role)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
