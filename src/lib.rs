//! # hct-scheme — Dynamic UI color schemes from one seed color
//!
//! Turns a single seed color into a complete UI color scheme — surfaces,
//! accents, outlines, and their "on" colors — with WCAG contrast built in
//! by construction rather than checked after the fact. One parameter shift
//! (seed, variant, dark/light, contrast dial) produces a new scheme whose
//! every text/background pairing still reads.
//!
//! # Architecture
//!
//! ```text
//! seed Argb + Variant + is_dark + contrast_level
//!     │
//!     ▼
//! cam.rs / hct.rs: CAM16 appearance model + HCT space
//!                  (hue/chroma/tone, gamut-mapped to sRGB)
//!     │
//!     ▼
//! variant.rs:  derive six tonal palettes from the seed
//!     │
//!     ▼
//! roles.rs:    declarative table of ~40 color roles
//!              (baseline tones, contrast curves, delta pairs)
//!     │
//!     ▼
//! scheme.rs:   resolve each role's tone against its background
//!              (contrast.rs supplies the WCAG ratio math)
//!     │
//!     ▼
//! palette.rs:  color each resolved tone from the role's palette
//! ```
//!
//! # Color Space
//!
//! All tone math happens in HCT: CAM16 hue and chroma paired with CIE L*
//! lightness, so equal tone steps are equal perceived-lightness steps and
//! contrast ratios depend on tone alone. Colors leave the crate as sRGB
//! [`Argb`] values.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
// Appearance-model math uses small integer-to-float casts.
#![allow(clippy::cast_precision_loss)]
// Channel extraction truncates intentionally.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Weights and matrices are more readable unscaled.
#![allow(clippy::unreadable_literal)]
// Exact f64 equality is asserted only for values produced by the same
// code path, where it is well-defined.
#![allow(clippy::float_cmp)]

pub mod cam;
pub mod color;
pub mod contrast;
pub mod hct;
pub mod palette;
pub mod role;
pub mod roles;
pub mod scheme;
pub mod variant;

pub use color::Argb;
pub use hct::Hct;
pub use palette::TonalPalette;
pub use role::{ContrastCurve, RegistryError, Role, RoleRegistry, RoleSpec};
pub use scheme::DynamicScheme;
pub use variant::Variant;
