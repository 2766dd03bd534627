//! CAM16 color appearance model.
//!
//! The forward transform runs a device color through linear light, a cone
//! response (chromatic adaptation), and the appearance equations, producing
//! the perceptual correlates hue, chroma, and lightness J. The inverse —
//! given (J, chroma, hue), produce a device color — is closed form; what is
//! *not* closed form is hitting a target tone (L*), which is the solver's
//! job in [`crate::hct`].
//!
//! Everything here is evaluated under a single set of [`ViewingConditions`]
//! describing an average sRGB viewing environment. The conditions are
//! computed once and shared.

use std::sync::LazyLock;

use crate::color::{
    Argb, WHITE_POINT_D65, argb_from_xyz, matrix_multiply, sanitize_degrees, xyz_from_argb,
    y_from_lstar,
};

// XYZ ↔ cone response, from the CAM16 definition.
const XYZ_TO_CAM16RGB: [[f64; 3]; 3] = [
    [0.401_288, 0.650_173, -0.051_461],
    [-0.250_268, 1.204_414, 0.045_854],
    [-0.002_079, 0.048_952, 0.953_127],
];

const CAM16RGB_TO_XYZ: [[f64; 3]; 3] = [
    [1.862_067_855_087_232_7, -1.011_254_630_531_684_3, 0.149_186_775_444_451_75],
    [0.387_526_543_236_137_17, 0.621_447_441_931_475_3, -0.008_973_985_167_612_518],
    [-0.015_841_498_849_333_856, -0.034_122_938_028_515_57, 1.049_964_436_877_849_6],
];

// ── ViewingConditions ───────────────────────────────────────────────────

/// The frame in which a color is seen: adapting luminance, background,
/// surround. All appearance correlates are relative to this frame.
#[derive(Debug, Clone)]
pub struct ViewingConditions {
    pub n: f64,
    pub aw: f64,
    pub nbb: f64,
    pub ncb: f64,
    pub c: f64,
    pub nc: f64,
    pub rgb_d: [f64; 3],
    pub fl: f64,
    pub fl_root: f64,
    pub z: f64,
}

static DEFAULT_CONDITIONS: LazyLock<ViewingConditions> = LazyLock::new(|| {
    ViewingConditions::make(
        WHITE_POINT_D65,
        200.0 / std::f64::consts::PI * y_from_lstar(50.0) / 100.0,
        50.0,
        2.0,
        false,
    )
});

impl ViewingConditions {
    /// The standard frame: D65 white, ~11.7 cd/m² adapting luminance,
    /// mid-gray background, average surround.
    #[must_use]
    pub fn standard() -> &'static Self {
        &DEFAULT_CONDITIONS
    }

    /// Derive viewing conditions from their physical description.
    #[must_use]
    pub fn make(
        white_point: [f64; 3],
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting_illuminant: bool,
    ) -> Self {
        let rgb_w = matrix_multiply(white_point, &XYZ_TO_CAM16RGB);

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };
        let d = if discounting_illuminant {
            1.0
        } else {
            (f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())).clamp(0.0, 1.0)
        };
        let nc = f;
        let rgb_d = [
            d.mul_add(100.0 / rgb_w[0], 1.0 - d),
            d.mul_add(100.0 / rgb_w[1], 1.0 - d),
            d.mul_add(100.0 / rgb_w[2], 1.0 - d),
        ];

        let k = 1.0 / 5.0f64.mul_add(adapting_luminance, 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = (k4 * adapting_luminance)
            + 0.1 * k4f * k4f * (5.0 * adapting_luminance).cbrt();

        let n = y_from_lstar(background_lstar) / white_point[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let rgb_a_factors = [
            (fl * rgb_d[0] * rgb_w[0] / 100.0).powf(0.42),
            (fl * rgb_d[1] * rgb_w[1] / 100.0).powf(0.42),
            (fl * rgb_d[2] * rgb_w[2] / 100.0).powf(0.42),
        ];
        let rgb_a = [
            400.0 * rgb_a_factors[0] / (rgb_a_factors[0] + 27.13),
            400.0 * rgb_a_factors[1] / (rgb_a_factors[1] + 27.13),
            400.0 * rgb_a_factors[2] / (rgb_a_factors[2] + 27.13),
        ];
        let aw = 0.05f64.mul_add(rgb_a[2], 2.0f64.mul_add(rgb_a[0], rgb_a[1])) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb,
            c,
            nc,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }
}

fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (stop - start).mul_add(amount, start)
}

// ── Cam16 ───────────────────────────────────────────────────────────────

/// A color expressed as CAM16 appearance correlates, plus the CAM16-UCS
/// coordinates used for perceptual distance.
#[derive(Debug, Clone, Copy)]
pub struct Cam16 {
    /// Hue angle in degrees, [0, 360).
    pub hue: f64,
    /// Chroma: colorfulness relative to the white point.
    pub chroma: f64,
    /// Lightness J.
    pub j: f64,
    /// CAM16-UCS J*.
    pub jstar: f64,
    /// CAM16-UCS a*.
    pub astar: f64,
    /// CAM16-UCS b*.
    pub bstar: f64,
}

impl Cam16 {
    /// Forward transform: appearance of a device color under the standard
    /// viewing conditions.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        Self::from_argb_in(argb, ViewingConditions::standard())
    }

    /// Forward transform under explicit viewing conditions.
    #[must_use]
    pub fn from_argb_in(argb: Argb, frame: &ViewingConditions) -> Self {
        let xyz = xyz_from_argb(argb);
        let cone = matrix_multiply(xyz, &XYZ_TO_CAM16RGB);

        // Discount the illuminant, then compress the cone response.
        let r_d = frame.rgb_d[0] * cone[0];
        let g_d = frame.rgb_d[1] * cone[1];
        let b_d = frame.rgb_d[2] * cone[2];
        let r_af = (frame.fl * r_d.abs() / 100.0).powf(0.42);
        let g_af = (frame.fl * g_d.abs() / 100.0).powf(0.42);
        let b_af = (frame.fl * b_d.abs() / 100.0).powf(0.42);
        let r_a = r_d.signum() * 400.0 * r_af / (r_af + 27.13);
        let g_a = g_d.signum() * 400.0 * g_af / (g_af + 27.13);
        let b_a = b_d.signum() * 400.0 * b_af / (b_af + 27.13);

        // Opponent dimensions and auxiliary components.
        let a = (11.0f64.mul_add(r_a, -(12.0 * g_a)) + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        let u = (20.0f64.mul_add(r_a, 20.0 * g_a) + 21.0 * b_a) / 20.0;
        let p2 = (40.0f64.mul_add(r_a, 20.0 * g_a) + b_a) / 20.0;

        let hue = sanitize_degrees(b.atan2(a).to_degrees());
        let hue_radians = hue.to_radians();

        let ac = p2 * frame.nbb;
        let j = 100.0 * (ac / frame.aw).powf(frame.c * frame.z);

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let e_hue = 0.25 * ((hue_prime.to_radians() + 2.0).cos() + 3.8);
        let p1 = 50000.0 / 13.0 * e_hue * frame.nc * frame.ncb;
        let t = p1 * a.hypot(b) / (u + 0.305);
        let alpha = t.powf(0.9) * (1.64 - 0.29f64.powf(frame.n)).powf(0.73);
        let chroma = alpha * (j / 100.0).sqrt();

        let m = chroma * frame.fl_root;
        let jstar = (1.0 + 100.0 * 0.007) * j / 0.007f64.mul_add(j, 1.0);
        let mstar = (0.0228 * m).ln_1p() / 0.0228;

        Self {
            hue,
            chroma,
            j,
            jstar,
            astar: mstar * hue_radians.cos(),
            bstar: mstar * hue_radians.sin(),
        }
    }

    /// Appearance correlates from (J, chroma, hue) directly, without a
    /// device color — used to measure how far clipping moved a candidate.
    #[must_use]
    pub fn from_jch_ucs(j: f64, chroma: f64, hue: f64) -> Self {
        Self::from_jch_ucs_in(j, chroma, hue, ViewingConditions::standard())
    }

    /// [`Self::from_jch_ucs`] under explicit viewing conditions.
    #[must_use]
    pub fn from_jch_ucs_in(j: f64, chroma: f64, hue: f64, frame: &ViewingConditions) -> Self {
        let hue = sanitize_degrees(hue);
        let hue_radians = hue.to_radians();
        let m = chroma * frame.fl_root;
        let jstar = (1.0 + 100.0 * 0.007) * j / 0.007f64.mul_add(j, 1.0);
        let mstar = (0.0228 * m).ln_1p() / 0.0228;
        Self {
            hue,
            chroma,
            j,
            jstar,
            astar: mstar * hue_radians.cos(),
            bstar: mstar * hue_radians.sin(),
        }
    }

    /// Inverse transform: the device color whose appearance is (J, chroma,
    /// hue) under the standard viewing conditions. Channels clamp to the
    /// sRGB gamut, so an unachievable triple yields its clipped neighbor.
    #[must_use]
    pub fn argb_from_jch(j: f64, chroma: f64, hue: f64) -> Argb {
        Self::argb_from_jch_in(j, chroma, hue, ViewingConditions::standard())
    }

    /// Inverse transform under explicit viewing conditions.
    #[must_use]
    pub fn argb_from_jch_in(j: f64, chroma: f64, hue: f64, frame: &ViewingConditions) -> Argb {
        if j < 1e-9 {
            return argb_from_xyz(0.0, 0.0, 0.0);
        }

        let alpha = chroma / (j / 100.0).sqrt();
        let t = (alpha / (1.64 - 0.29f64.powf(frame.n)).powf(0.73)).powf(1.0 / 0.9);
        let h_rad = hue.to_radians();

        let e_hue = 0.25 * ((h_rad + 2.0).cos() + 3.8);
        let ac = frame.aw * (j / 100.0).powf(1.0 / (frame.c * frame.z));
        let p1 = e_hue * (50000.0 / 13.0) * frame.nc * frame.ncb;
        let p2 = ac / frame.nbb;

        let h_sin = h_rad.sin();
        let h_cos = h_rad.cos();
        let gamma = 23.0 * (p2 + 0.305) * t
            / (108.0 * t).mul_add(h_sin, (11.0 * t).mul_add(h_cos, 23.0 * p1));
        let a = gamma * h_cos;
        let b = gamma * h_sin;

        let r_a = 288.0f64.mul_add(b, 460.0f64.mul_add(p2, 451.0 * a)) / 1403.0;
        let g_a = (-261.0f64).mul_add(b, 460.0f64.mul_add(p2, -(891.0 * a))) / 1403.0;
        let b_a = (-6300.0f64).mul_add(b, 460.0f64.mul_add(p2, -(220.0 * a))) / 1403.0;

        let r_c = uncompress(r_a, frame.fl);
        let g_c = uncompress(g_a, frame.fl);
        let b_c = uncompress(b_a, frame.fl);

        let cone = [
            r_c / frame.rgb_d[0],
            g_c / frame.rgb_d[1],
            b_c / frame.rgb_d[2],
        ];
        let xyz = matrix_multiply(cone, &CAM16RGB_TO_XYZ);
        argb_from_xyz(xyz[0], xyz[1], xyz[2])
    }

    /// CAM16-UCS distance, the ΔE the solver uses to judge whether gamut
    /// clipping moved a candidate too far from the requested appearance.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let d_j = self.jstar - other.jstar;
        let d_a = self.astar - other.astar;
        let d_b = self.bstar - other.bstar;
        let d_e_prime = d_b.mul_add(d_b, d_j.mul_add(d_j, d_a * d_a)).sqrt();
        1.41 * d_e_prime.powf(0.63)
    }
}

// Undo the hyperbolic cone response compression for one channel.
fn uncompress(adapted: f64, fl: f64) -> f64 {
    let base = (27.13 * adapted.abs() / (400.0 - adapted.abs())).max(0.0);
    adapted.signum() * (100.0 / fl) * base.powf(1.0 / 0.42)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
