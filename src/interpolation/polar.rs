//! Polar perceptual spaces: CIE LCh and OKLCH.
//!
//! Hue travels the shorter arc between the endpoints. Chroma is kept
//! non-negative and lightness inside its valid range.

use palette::white_point::D65;
use palette::{FromColor, LabHue, Lch, OklabHue, Oklch, Srgb};

use super::common::{carry_hue, clamp_t, ensure_finite, lerp, lerp_hue_shortest};
use super::{InterpolationMethod, Interpolator};
use crate::color::Rgb;
use crate::error::Result;

/// Lightness, chroma and hue (degrees) of a color in CIE LCh (D65).
pub fn to_lch(rgb: Rgb) -> [f64; 3] {
    let [r, g, b] = rgb.to_unit();
    let lch = Lch::<D65, f64>::from_color(Srgb::new(r, g, b));
    [lch.l, lch.chroma, lch.hue.into_positive_degrees()]
}

/// Convert CIE LCh coordinates back into sRGB, clamping out-of-range values.
pub fn from_lch([l, chroma, hue]: [f64; 3]) -> Result<Rgb> {
    let lch = Lch::<D65, f64>::new(
        l.clamp(0.0, 100.0),
        chroma.max(0.0),
        LabHue::from_degrees(hue),
    );
    let srgb = Srgb::<f64>::from_color(lch);
    ensure_finite(Rgb::from_unit([srgb.red, srgb.green, srgb.blue]), "lch")
}

fn to_oklch(rgb: Rgb) -> [f64; 3] {
    let [r, g, b] = rgb.to_unit();
    let oklch = Oklch::<f64>::from_color(Srgb::new(r, g, b));
    [oklch.l, oklch.chroma, oklch.hue.into_positive_degrees()]
}

fn from_oklch([l, chroma, hue]: [f64; 3]) -> Result<Rgb> {
    let oklch = Oklch::<f64>::new(
        l.clamp(0.0, 1.0),
        chroma.max(0.0),
        OklabHue::from_degrees(hue),
    );
    let srgb = Srgb::<f64>::from_color(oklch);
    ensure_finite(Rgb::from_unit([srgb.red, srgb.green, srgb.blue]), "oklch")
}

/// Blend two lightness/chroma/hue triples: linear L and C, shortest-arc hue.
pub fn lerp_polar(start: [f64; 3], end: [f64; 3], t: f64) -> [f64; 3] {
    let t = clamp_t(t);
    let (hue_a, hue_b) = carry_hue(start[2], start[1], end[2], end[1]);
    [
        lerp(start[0], end[0], t),
        lerp(start[1], end[1], t).max(0.0),
        lerp_hue_shortest(hue_a, hue_b, t),
    ]
}

/// CIE LCh blend
pub struct LchInterpolator;

impl Interpolator for LchInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::Lch
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        from_lch(lerp_polar(to_lch(a), to_lch(b), t))
    }
}

/// OKLCH blend
pub struct OklchInterpolator;

impl Interpolator for OklchInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::Oklch
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        from_oklch(lerp_polar(to_oklch(a), to_oklch(b), t))
    }
}
