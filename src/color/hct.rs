//! HCT: hue and chroma from CAM16, tone from CIE L*.
//!
//! The forward transform is closed-form. The inverse has no closed form: for
//! a requested hue/chroma/tone we solve CAM16 lightness J so the result has
//! the requested luminance, and if the requested chroma does not fit in sRGB
//! at that hue and tone we bisect chroma down to the gamut boundary. Hue and
//! tone are always preserved; chroma is what gives.

use once_cell::sync::Lazy;
use palette::convert::FromColorUnclamped;
use palette::white_point::D65;
use palette::{LinSrgb, Srgb, Xyz};
use std::f64::consts::PI;

use crate::color::codec::Rgb;
use crate::error::{HueError, Result};

/// CIE constants for the L* transfer.
const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

/// Allowed overshoot of a linear channel before a solution counts as out of
/// gamut.
const GAMUT_TOLERANCE: f64 = 1e-4;

const NEWTON_ROUNDS: usize = 5;
const BISECTION_ROUNDS: usize = 24;

/// Below this chroma, or outside this tone band, the result is a gray.
const MIN_CHROMA: f64 = 1e-4;
const MIN_TONE: f64 = 1e-4;
const MAX_TONE: f64 = 99.9999;

/// XYZ to the CAM16 cone space.
const CAT16: [[f64; 3]; 3] = [
    [0.401288, 0.650173, -0.051461],
    [-0.250268, 1.204414, 0.045854],
    [-0.002079, 0.048952, 0.953127],
];

/// CAM16 cone space back to XYZ.
const CAT16_INVERSE: [[f64; 3]; 3] = [
    [1.86206786, -1.01125463, 0.14918677],
    [0.38752654, 0.62144744, -0.00897398],
    [-0.01584150, -0.03412294, 1.04996444],
];

const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

fn mul3(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Relative luminance Y (0-100) for an L* value.
pub fn y_from_lstar(lstar: f64) -> f64 {
    let ft = (lstar + 16.0) / 116.0;
    let ft3 = ft * ft * ft;
    let y = if ft3 > EPSILON {
        ft3
    } else {
        (116.0 * ft - 16.0) / KAPPA
    };
    y * 100.0
}

/// L* for a relative luminance Y (0-100).
pub fn lstar_from_y(y: f64) -> f64 {
    let yn = y / 100.0;
    let fy = if yn > EPSILON {
        yn.cbrt()
    } else {
        (KAPPA * yn + 16.0) / 116.0
    };
    116.0 * fy - 16.0
}

/// CAM16 viewing conditions.
#[derive(Debug)]
struct ViewingConditions {
    n: f64,
    aw: f64,
    nbb: f64,
    ncb: f64,
    c: f64,
    nc: f64,
    rgb_d: [f64; 3],
    fl: f64,
    z: f64,
}

impl ViewingConditions {
    /// sRGB-like defaults: D65 white, mid-gray background (L* 50), average
    /// surround, no discounting of the illuminant.
    fn standard() -> Self {
        let white = WHITE_POINT_D65;
        let adapting_luminance = 200.0 / PI * y_from_lstar(50.0) / 100.0;
        let background_lstar: f64 = 50.0;
        let surround = 2.0;

        let rgb_w = mul3(&CAT16, white);
        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            0.59 + (0.69 - 0.59) * ((f - 0.9) * 10.0)
        } else {
            0.525 + (0.59 - 0.525) * ((f - 0.8) * 10.0)
        };
        let d = (f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp()))
            .clamp(0.0, 1.0);
        let rgb_d = rgb_w.map(|w| d * (100.0 / w) + 1.0 - d);

        let k = 1.0 / (5.0 * adapting_luminance + 1.0);
        let k4 = k.powi(4);
        let k4f = 1.0 - k4;
        let fl = k4 * adapting_luminance + 0.1 * k4f * k4f * (5.0 * adapting_luminance).cbrt();
        let n = y_from_lstar(background_lstar) / white[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);

        let rgb_a = [0, 1, 2].map(|i| {
            let factor = (fl * rgb_d[i] * rgb_w[i] / 100.0).powf(0.42);
            400.0 * factor / (factor + 27.13)
        });
        let aw = (2.0 * rgb_a[0] + rgb_a[1] + 0.05 * rgb_a[2]) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb: nbb,
            c,
            nc: f,
            rgb_d,
            fl,
            z,
        }
    }
}

static VIEWING_CONDITIONS: Lazy<ViewingConditions> = Lazy::new(ViewingConditions::standard);

/// A color in HCT coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hct {
    /// Hue angle in degrees, 0..360
    pub hue: f64,
    /// Colorfulness, 0 and up (the sRGB maximum is about 130)
    pub chroma: f64,
    /// Perceived lightness, 0..=100 (CIE L*)
    pub tone: f64,
}

impl Hct {
    pub fn new(hue: f64, chroma: f64, tone: f64) -> Self {
        Self { hue, chroma, tone }
    }

    /// Measure an sRGB color.
    pub fn from_rgb(rgb: Rgb) -> Result<Self> {
        if !rgb.is_finite() {
            return Err(HueError::conversion("hct", "input channel is not finite"));
        }
        let [r, g, b] = rgb.to_unit();
        let xyz: Xyz<D65, f64> = Xyz::from_color_unclamped(Srgb::new(r, g, b));
        let (x, y, z) = (xyz.x * 100.0, xyz.y * 100.0, xyz.z * 100.0);

        let (hue, chroma) = cam16_hue_chroma([x, y, z], &VIEWING_CONDITIONS);
        let hct = Hct::new(hue, chroma, lstar_from_y(y));
        if hct.hue.is_finite() && hct.chroma.is_finite() && hct.tone.is_finite() {
            Ok(hct)
        } else {
            Err(HueError::conversion("hct", format!("non-finite result {:?}", hct)))
        }
    }

    /// The closest sRGB color with this hue and tone, reducing chroma if it
    /// does not fit in gamut.
    pub fn to_rgb(&self) -> Result<Rgb> {
        if !(self.hue.is_finite() && self.chroma.is_finite() && self.tone.is_finite()) {
            return Err(HueError::conversion(
                "hct",
                format!("cannot solve non-finite coordinates {:?}", self),
            ));
        }
        let hue = self.hue.rem_euclid(360.0);
        let chroma = self.chroma.max(0.0);
        let tone = self.tone.clamp(0.0, 100.0);
        let vc = &*VIEWING_CONDITIONS;

        if chroma < MIN_CHROMA || !(MIN_TONE..=MAX_TONE).contains(&tone) {
            return Ok(gray(tone));
        }

        let y = y_from_lstar(tone);
        if let Some(linear) = solve_j(hue, chroma, y, vc) {
            return Ok(linear_to_rgb(linear));
        }

        let (mut low, mut high) = (0.0, chroma);
        let mut best: Option<[f64; 3]> = None;
        for _ in 0..BISECTION_ROUNDS {
            let mid = (low + high) / 2.0;
            match solve_j(hue, mid, y, vc) {
                Some(linear) => {
                    best = Some(linear);
                    low = mid;
                }
                None => high = mid,
            }
        }

        Ok(best.map(linear_to_rgb).unwrap_or_else(|| gray(tone)))
    }
}

fn gray(tone: f64) -> Rgb {
    let channel = (y_from_lstar(tone) / 100.0).clamp(0.0, 1.0);
    linear_to_rgb([channel; 3])
}

fn linear_to_rgb(linear: [f64; 3]) -> Rgb {
    let [r, g, b] = linear.map(|c| c.clamp(0.0, 1.0));
    let srgb: Srgb<f64> = Srgb::from_linear(LinSrgb::new(r, g, b));
    Rgb::from_unit([srgb.red, srgb.green, srgb.blue])
}

/// Forward CAM16: XYZ (0-100) to hue angle and chroma.
fn cam16_hue_chroma(xyz: [f64; 3], vc: &ViewingConditions) -> (f64, f64) {
    let cone = mul3(&CAT16, xyz);
    let adapted = [0, 1, 2].map(|i| {
        let d = vc.rgb_d[i] * cone[i];
        let af = (vc.fl * d.abs() / 100.0).powf(0.42);
        d.signum() * 400.0 * af / (af + 27.13)
    });
    let [ra, ga, ba] = adapted;

    let a = (11.0 * ra + -12.0 * ga + ba) / 11.0;
    let b = (ra + ga - 2.0 * ba) / 9.0;
    let u = (20.0 * ra + 20.0 * ga + 21.0 * ba) / 20.0;
    let p2 = (40.0 * ra + 20.0 * ga + ba) / 20.0;

    let hue = b.atan2(a).to_degrees().rem_euclid(360.0);

    let ac = p2 * vc.nbb;
    let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);

    let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
    let e_hue = 0.25 * ((hue_prime.to_radians() + 2.0).cos() + 3.8);
    let p1 = 50000.0 / 13.0 * e_hue * vc.nc * vc.ncb;
    let t = p1 * a.hypot(b) / (u + 0.305);
    let alpha = t.powf(0.9) * (1.64 - 0.29_f64.powf(vc.n)).powf(0.73);
    let chroma = alpha * (j / 100.0).sqrt();

    (hue, chroma)
}

/// Inverse CAM16: lightness J, chroma and hue to XYZ (0-100).
fn cam16_to_xyz(j: f64, chroma: f64, hue: f64, vc: &ViewingConditions) -> [f64; 3] {
    let alpha = if chroma == 0.0 || j == 0.0 {
        0.0
    } else {
        chroma / (j / 100.0).sqrt()
    };
    let t = (alpha / (1.64 - 0.29_f64.powf(vc.n)).powf(0.73)).powf(1.0 / 0.9);
    let h_rad = hue.to_radians();

    let e_hue = 0.25 * ((h_rad + 2.0).cos() + 3.8);
    let ac = vc.aw * (j / 100.0).powf(1.0 / vc.c / vc.z);
    let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
    let p2 = ac / vc.nbb;

    let (h_sin, h_cos) = h_rad.sin_cos();
    let gamma = 23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
    let a = gamma * h_cos;
    let b = gamma * h_sin;

    let ra = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
    let ga = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
    let ba = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;

    let cone = [ra, ga, ba].map(|adapted| {
        let base = (27.13 * adapted.abs() / (400.0 - adapted.abs())).max(0.0);
        adapted.signum() * (100.0 / vc.fl) * base.powf(1.0 / 0.42)
    });
    let unadapted = [0, 1, 2].map(|i| cone[i] / vc.rgb_d[i]);

    mul3(&CAT16_INVERSE, unadapted)
}

/// Newton-iterate J until the color's luminance matches `y` (0-100).
/// Returns linear sRGB (0-1) or `None` when the result is out of gamut.
fn solve_j(hue: f64, chroma: f64, y: f64, vc: &ViewingConditions) -> Option<[f64; 3]> {
    let mut j = y.sqrt() * 11.0;

    for round in 0..NEWTON_ROUNDS {
        let [x, fnj, z] = cam16_to_xyz(j, chroma, hue, vc);
        let xyz: Xyz<D65, f64> = Xyz::new(x / 100.0, fnj / 100.0, z / 100.0);
        let linear: LinSrgb<f64> = LinSrgb::from_color_unclamped(xyz);
        let channels = [linear.red, linear.green, linear.blue];

        if channels.iter().any(|c| !c.is_finite() || *c < -GAMUT_TOLERANCE) || fnj <= 0.0 {
            return None;
        }

        if round == NEWTON_ROUNDS - 1 || (fnj - y).abs() < 0.002 {
            if channels.iter().any(|c| *c > 1.0 + GAMUT_TOLERANCE) {
                return None;
            }
            return Some(channels);
        }

        j -= (fnj - y) * j / (2.0 * fnj);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::codec::{decode, Color};

    fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "{what}: actual = {actual}, expected = {expected}"
        );
    }

    fn max_channel_diff(a: Color, b: Color) -> i32 {
        a.bytes()
            .iter()
            .zip(b.bytes().iter())
            .map(|(x, y)| (*x as i32 - *y as i32).abs())
            .max()
            .unwrap()
    }

    #[test]
    fn test_lstar_round_trip() {
        for lstar in [0.0, 5.0, 8.0, 50.0, 75.5, 100.0] {
            assert_close(lstar_from_y(y_from_lstar(lstar)), lstar, 1e-9, "lstar");
        }
        assert_close(y_from_lstar(50.0), 18.418, 1e-3, "y(50)");
    }

    #[test]
    fn test_known_coordinates() {
        let red = Hct::from_rgb(decode("#ff0000").unwrap()).unwrap();
        assert_close(red.hue, 27.41, 0.5, "red hue");
        assert_close(red.chroma, 113.36, 1.0, "red chroma");
        assert_close(red.tone, 53.24, 0.05, "red tone");

        let blue = Hct::from_rgb(decode("#0000ff").unwrap()).unwrap();
        assert_close(blue.hue, 282.79, 0.5, "blue hue");
        assert_close(blue.tone, 32.30, 0.05, "blue tone");
    }

    #[test]
    fn test_grays_have_little_chroma() {
        // CAM16 leaves a small residual chroma on neutrals under D65
        for hex in ["#000000", "#808080", "#ffffff"] {
            let hct = Hct::from_rgb(decode(hex).unwrap()).unwrap();
            assert!(hct.chroma < 4.0, "{hex} chroma = {}", hct.chroma);
        }
    }

    #[test]
    fn test_round_trip_within_one_step() {
        for hex in [
            "#ff0000", "#00ff00", "#0000ff", "#9c27b0", "#2196f3", "#808080", "#ffffff",
            "#000000", "#123456", "#fedcba", "#ffeb3b",
        ] {
            let color: Color = hex.parse().unwrap();
            let hct = Hct::from_rgb(color.rgb()).unwrap();
            let back = Color::from_rgb(hct.to_rgb().unwrap());
            assert!(
                max_channel_diff(color, back) <= 2,
                "{hex} came back as {back} via {hct:?}"
            );
        }
    }

    #[test]
    fn test_out_of_gamut_chroma_is_reduced_keeping_tone() {
        let hct = Hct::new(140.0, 200.0, 60.0);
        let rgb = hct.to_rgb().unwrap();
        let measured = Hct::from_rgb(Color::from_rgb(rgb).rgb()).unwrap();
        assert_close(measured.tone, 60.0, 0.5, "tone");
        assert!(measured.chroma < 200.0);
        assert_close(measured.hue, 140.0, 2.0, "hue");
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Hct::new(f64::NAN, 10.0, 50.0).to_rgb().is_err());
        assert!(Hct::from_rgb(Rgb::new(f64::INFINITY, 0.0, 0.0)).is_err());
    }
}
