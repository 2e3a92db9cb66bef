//! OKLCH/RGB compromise.
//!
//! Computes both the OKLCH and the plain RGB blend at the same `t`, quantizes
//! each to a finished color, and mixes the two channel-wise. The weight favors
//! the perceptual result; the RGB share keeps some of RGB's saturated
//! midpoints.

use super::common::{clamp_t, ensure_finite};
use super::polar::OklchInterpolator;
use super::rgb::RgbInterpolator;
use super::{InterpolationMethod, Interpolator};
use crate::color::{Color, Rgb};
use crate::error::Result;

/// Share of the OKLCH result in the final mix.
pub const DEFAULT_OKLCH_WEIGHT: f64 = 0.7;

/// Weighted mix of OKLCH and RGB blends
pub struct BlendedOklchRgbInterpolator {
    oklch_weight: f64,
}

impl BlendedOklchRgbInterpolator {
    pub fn new(oklch_weight: f64) -> Self {
        Self {
            oklch_weight: clamp_t(oklch_weight),
        }
    }
}

impl Default for BlendedOklchRgbInterpolator {
    fn default() -> Self {
        Self::new(DEFAULT_OKLCH_WEIGHT)
    }
}

impl Interpolator for BlendedOklchRgbInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::BlendedOklchRgb
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        let t = clamp_t(t);
        let perceptual = Color::from_rgb(OklchInterpolator.blend(a, b, t)?).rgb();
        let linear = Color::from_rgb(RgbInterpolator.blend(a, b, t)?).rgb();

        ensure_finite(linear.lerp(perceptual, self.oklch_weight), "blended_oklch_rgb")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::decode;

    #[test]
    fn test_weight_extremes_match_components() {
        let (a, b) = (decode("#ff0000").unwrap(), decode("#0000ff").unwrap());

        let all_rgb = BlendedOklchRgbInterpolator::new(0.0).blend(a, b, 0.5).unwrap();
        assert_eq!(Color::from_rgb(all_rgb).to_string(), "#800080");

        let all_oklch = BlendedOklchRgbInterpolator::new(1.0).blend(a, b, 0.5).unwrap();
        let oklch = OklchInterpolator.blend(a, b, 0.5).unwrap();
        assert_eq!(Color::from_rgb(all_oklch), Color::from_rgb(oklch));
    }

    #[test]
    fn test_default_mix_sits_between() {
        let (a, b) = (decode("#ff0000").unwrap(), decode("#0000ff").unwrap());
        let mixed = BlendedOklchRgbInterpolator::default().blend(a, b, 0.5).unwrap();
        let oklch = Color::from_rgb(OklchInterpolator.blend(a, b, 0.5).unwrap()).rgb();
        let rgb = Color::from_rgb(RgbInterpolator.blend(a, b, 0.5).unwrap()).rgb();

        let expected_r = rgb.r * 0.3 + oklch.r * 0.7;
        assert!((mixed.r - expected_r).abs() < 1e-9);
    }

    #[test]
    fn test_endpoints() {
        let (a, b) = (decode("#9c27b0").unwrap(), decode("#2196f3").unwrap());
        let interpolator = BlendedOklchRgbInterpolator::default();
        assert_eq!(Color::from_rgb(interpolator.blend(a, b, 0.0).unwrap()).to_string(), "#9c27b0");
        assert_eq!(Color::from_rgb(interpolator.blend(a, b, 1.0).unwrap()).to_string(), "#2196f3");
    }
}
