//! HSL interpolation.
//!
//! Hue is interpolated as a plain number on 0..360 without wrapping, so red
//! (0) to magenta (300) passes through green and blue. Saturation and
//! lightness are linear. An achromatic endpoint takes the other's hue.

use palette::encoding::Srgb as SrgbStandard;
use palette::{FromColor, Hsl, RgbHue, Srgb};

use super::common::{carry_hue, clamp_t, ensure_finite, lerp};
use super::{InterpolationMethod, Interpolator};
use crate::color::Rgb;
use crate::error::Result;

type HslF64 = Hsl<SrgbStandard, f64>;

fn to_hsl(rgb: Rgb) -> HslF64 {
    let [r, g, b] = rgb.to_unit();
    HslF64::from_color(Srgb::new(r, g, b))
}

/// HSL blend with numeric (non-wrapping) hue
pub struct HslInterpolator;

impl Interpolator for HslInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::Hsl
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        let t = clamp_t(t);
        let (start, end) = (to_hsl(a), to_hsl(b));

        let (hue_a, hue_b) = carry_hue(
            start.hue.into_positive_degrees(),
            start.saturation,
            end.hue.into_positive_degrees(),
            end.saturation,
        );

        let mixed = HslF64::new(
            RgbHue::from_degrees(lerp(hue_a, hue_b, t)),
            lerp(start.saturation, end.saturation, t),
            lerp(start.lightness, end.lightness, t),
        );
        let srgb = Srgb::<f64>::from_color(mixed);
        ensure_finite(Rgb::from_unit([srgb.red, srgb.green, srgb.blue]), "hsl")
    }
}
