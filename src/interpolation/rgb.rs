//! Linear RGB interpolation.
//!
//! Blends each decoded sRGB channel independently. This is the end of every
//! fallback chain, so it must not fail on well-formed input.

use super::common::{clamp_t, ensure_finite};
use super::{InterpolationMethod, Interpolator};
use crate::color::Rgb;
use crate::error::Result;

/// Per-channel linear blend in gamma-encoded sRGB
pub struct RgbInterpolator;

impl Interpolator for RgbInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::Rgb
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        ensure_finite(a.lerp(b, clamp_t(t)), "rgb")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{decode, encode};

    fn blend_hex(a: &str, b: &str, t: f64) -> String {
        let rgb = RgbInterpolator
            .blend(decode(a).unwrap(), decode(b).unwrap(), t)
            .unwrap();
        encode(rgb)
    }

    #[test]
    fn test_midpoint_rounds_half_up() {
        assert_eq!(blend_hex("#000000", "#ffffff", 0.5), "#808080");
        assert_eq!(blend_hex("#ff0000", "#0000ff", 0.5), "#800080");
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(blend_hex("#123456", "#abcdef", 0.0), "#123456");
        assert_eq!(blend_hex("#123456", "#abcdef", 1.0), "#abcdef");
    }

    #[test]
    fn test_t_is_clamped() {
        assert_eq!(blend_hex("#000000", "#ffffff", -0.5), "#000000");
        assert_eq!(blend_hex("#000000", "#ffffff", 1.5), "#ffffff");
    }
}
