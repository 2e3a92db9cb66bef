//! Rectangular perceptual spaces: CIELAB and OKLab.
//!
//! Both endpoints are converted into the space, each coordinate is blended
//! linearly, and the result is converted back (clamped into sRGB).

use palette::white_point::D65;
use palette::{FromColor, Lab, Oklab, Srgb};

use super::common::{clamp_t, ensure_finite, lerp};
use super::{InterpolationMethod, Interpolator};
use crate::color::Rgb;
use crate::error::Result;

fn to_srgb(rgb: Rgb) -> Srgb<f64> {
    let [r, g, b] = rgb.to_unit();
    Srgb::new(r, g, b)
}

fn from_srgb(srgb: Srgb<f64>) -> Rgb {
    Rgb::from_unit([srgb.red, srgb.green, srgb.blue])
}

/// CIELAB (D65) blend
pub struct LabInterpolator;

impl Interpolator for LabInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::Lab
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        let t = clamp_t(t);
        let start = Lab::<D65, f64>::from_color(to_srgb(a));
        let end = Lab::<D65, f64>::from_color(to_srgb(b));

        let mixed = Lab::<D65, f64>::new(
            lerp(start.l, end.l, t),
            lerp(start.a, end.a, t),
            lerp(start.b, end.b, t),
        );
        ensure_finite(from_srgb(Srgb::from_color(mixed)), "lab")
    }
}

/// OKLab blend
pub struct OklabInterpolator;

impl Interpolator for OklabInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::Oklab
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        let t = clamp_t(t);
        let start = Oklab::<f64>::from_color(to_srgb(a));
        let end = Oklab::<f64>::from_color(to_srgb(b));

        let mixed = Oklab::<f64>::new(
            lerp(start.l, end.l, t),
            lerp(start.a, end.a, t),
            lerp(start.b, end.b, t),
        );
        ensure_finite(from_srgb(Srgb::from_color(mixed)), "oklab")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{decode, encode};

    fn blend_hex(interpolator: &dyn Interpolator, a: &str, b: &str, t: f64) -> String {
        let rgb = interpolator
            .blend(decode(a).unwrap(), decode(b).unwrap(), t)
            .unwrap();
        encode(rgb)
    }

    #[test]
    fn test_endpoints_round_trip() {
        for interpolator in [&LabInterpolator as &dyn Interpolator, &OklabInterpolator] {
            assert_eq!(blend_hex(interpolator, "#9c27b0", "#2196f3", 0.0), "#9c27b0");
            assert_eq!(blend_hex(interpolator, "#9c27b0", "#2196f3", 1.0), "#2196f3");
        }
    }

    #[test]
    fn test_lab_gray_midpoint_is_lstar_50() {
        assert_eq!(blend_hex(&LabInterpolator, "#000000", "#ffffff", 0.5), "#777777");
    }

    #[test]
    fn test_oklab_gray_midpoint() {
        assert_eq!(blend_hex(&OklabInterpolator, "#000000", "#ffffff", 0.5), "#636363");
    }
}
