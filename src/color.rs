//! Device color type and shared color science.
//!
//! [`Argb`] is the only externally visible color form: three 8-bit sRGB
//! channels plus alpha, immutable. Everything else in this module is the
//! numerical plumbing the rest of the crate leans on:
//!
//! - sRGB transfer function (linearize / delinearize)
//! - sRGB ↔ CIE XYZ matrices (D65)
//! - the L* ↔ Y curve — "tone" is CIE L*, and relative luminance is its
//!   optical counterpart
//!
//! All math is `f64`. Linear channel values run 0–100 (not 0–1), matching
//! the XYZ convention used by the appearance model in [`crate::cam`].

use std::fmt;

// ── Argb ────────────────────────────────────────────────────────────────

/// An 8-bit-per-channel sRGB device color with alpha. Immutable value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb {
    /// Alpha: 0 (transparent) to 255 (opaque).
    pub alpha: u8,
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Argb {
    /// Create an opaque color from red, green, and blue channels.
    #[inline]
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { alpha: 255, red, green, blue }
    }

    /// Create a color from all four channels.
    #[inline]
    #[must_use]
    pub const fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self { alpha, red, green, blue }
    }

    /// Unpack a `0xAARRGGBB` integer.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u32(argb: u32) -> Self {
        Self {
            alpha: (argb >> 24) as u8,
            red: (argb >> 16) as u8,
            green: (argb >> 8) as u8,
            blue: argb as u8,
        }
    }

    /// Pack into a `0xAARRGGBB` integer.
    #[inline]
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        (self.alpha as u32) << 24
            | (self.red as u32) << 16
            | (self.green as u32) << 8
            | self.blue as u32
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, or `#AARRGGBB`
    /// (leading `#` optional). Returns `None` on malformed input.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        match s.len() {
            3 => {
                let r = hex_digit(s.as_bytes()[0])?;
                let g = hex_digit(s.as_bytes()[1])?;
                let b = hex_digit(s.as_bytes()[2])?;
                Some(Self::from_rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = hex_byte(&s.as_bytes()[0..2])?;
                let g = hex_byte(&s.as_bytes()[2..4])?;
                let b = hex_byte(&s.as_bytes()[4..6])?;
                Some(Self::from_rgb(r, g, b))
            }
            8 => {
                let a = hex_byte(&s.as_bytes()[0..2])?;
                let r = hex_byte(&s.as_bytes()[2..4])?;
                let g = hex_byte(&s.as_bytes()[4..6])?;
                let b = hex_byte(&s.as_bytes()[6..8])?;
                Some(Self::new(a, r, g, b))
            }
            _ => None,
        }
    }

    /// Format as `#rrggbb` (alpha dropped — scheme output is always opaque).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Whether this color is fully opaque.
    #[inline]
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.alpha == 255
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.alpha, self.red, self.green, self.blue
            )
        }
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[inline]
const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = hex_digit(bytes[0])?;
    let lo = hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ── sRGB transfer function ──────────────────────────────────────────────

/// Linearize one 8-bit sRGB channel to 0–100 linear light.
#[must_use]
pub fn linearized(component: u8) -> f64 {
    let normalized = f64::from(component) / 255.0;
    if normalized <= 0.040_449_936 {
        normalized / 12.92 * 100.0
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
    }
}

/// Delinearize 0–100 linear light back to an 8-bit sRGB channel,
/// clamping out-of-range input.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn delinearized(rgb: f64) -> u8 {
    let normalized = rgb / 100.0;
    let delinearized = if normalized <= 0.003_130_8 {
        normalized * 12.92
    } else {
        1.055f64.mul_add(normalized.powf(1.0 / 2.4), -0.055)
    };
    (delinearized * 255.0).round().clamp(0.0, 255.0) as u8
}

// ── sRGB ↔ XYZ (D65) ────────────────────────────────────────────────────

/// The D65 standard illuminant white point.
pub const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

pub(crate) const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_338_95, 0.357_620_64, 0.180_510_42],
    [0.212_6, 0.715_2, 0.072_2],
    [0.019_321_41, 0.119_163_82, 0.950_344_78],
];

pub(crate) const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [
        3.241_377_479_238_868_5,
        -1.537_665_240_285_185_1,
        -0.498_853_668_462_680_53,
    ],
    [
        -0.969_145_251_300_532_1,
        1.875_885_345_106_787_2,
        0.041_565_856_169_120_61,
    ],
    [
        0.055_620_936_896_913_05,
        -0.203_955_245_647_421_23,
        1.057_179_911_122_033_5,
    ],
];

/// Convert a device color to CIE XYZ (D65, 0–100 scale).
#[must_use]
pub fn xyz_from_argb(argb: Argb) -> [f64; 3] {
    let r = linearized(argb.red);
    let g = linearized(argb.green);
    let b = linearized(argb.blue);
    matrix_multiply([r, g, b], &SRGB_TO_XYZ)
}

/// Convert CIE XYZ (D65, 0–100 scale) to a device color, clamping each
/// channel to the sRGB gamut.
#[must_use]
pub fn argb_from_xyz(x: f64, y: f64, z: f64) -> Argb {
    let linear = matrix_multiply([x, y, z], &XYZ_TO_SRGB);
    Argb::from_rgb(
        delinearized(linear[0]),
        delinearized(linear[1]),
        delinearized(linear[2]),
    )
}

pub(crate) fn matrix_multiply(row: [f64; 3], matrix: &[[f64; 3]; 3]) -> [f64; 3] {
    let a = row[2].mul_add(matrix[0][2], row[0].mul_add(matrix[0][0], row[1] * matrix[0][1]));
    let b = row[2].mul_add(matrix[1][2], row[0].mul_add(matrix[1][0], row[1] * matrix[1][1]));
    let c = row[2].mul_add(matrix[2][2], row[0].mul_add(matrix[2][0], row[1] * matrix[2][1]));
    [a, b, c]
}

// ── L* ↔ Y ──────────────────────────────────────────────────────────────
//
// Tone is CIE L*: perceptually uniform lightness. Y is relative luminance
// on a 0–100 scale. The two are related by the CIE 1976 curve below.

const KE: f64 = 8.0;
const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

/// Relative luminance Y (0–100) for a tone (L*, 0–100). Strictly
/// increasing over the whole scale.
#[must_use]
pub fn y_from_lstar(lstar: f64) -> f64 {
    if lstar > KE {
        let cube_root = (lstar + 16.0) / 116.0;
        cube_root * cube_root * cube_root * 100.0
    } else {
        lstar / KAPPA * 100.0
    }
}

/// Tone (L*, 0–100) for a relative luminance Y (0–100).
#[must_use]
pub fn lstar_from_y(y: f64) -> f64 {
    let normalized = y / 100.0;
    if normalized > EPSILON {
        116.0f64.mul_add(normalized.cbrt(), -16.0)
    } else {
        KAPPA * normalized
    }
}

/// Tone (L*) of a device color.
#[must_use]
pub fn lstar_from_argb(argb: Argb) -> f64 {
    lstar_from_y(xyz_from_argb(argb)[1])
}

/// The gray device color at the given tone. Out-of-range tone is clamped.
#[must_use]
pub fn argb_from_lstar(lstar: f64) -> Argb {
    let y = y_from_lstar(lstar.clamp(0.0, 100.0));
    let component = delinearized(y);
    Argb::from_rgb(component, component, component)
}

/// Normalize a hue angle into [0, 360).
#[must_use]
pub fn sanitize_degrees(degrees: f64) -> f64 {
    let degrees = degrees % 360.0;
    if degrees < 0.0 { degrees + 360.0 } else { degrees }
}

/// Shortest-arc distance between two hue angles, in degrees.
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
