//! Color interpolation across color spaces.
//!
//! Each supported color space has one [`Interpolator`]. Strategies work on
//! decoded [`Rgb`] triples and report failures as errors. The [`Registry`]
//! turns those errors into fallbacks, so callers of [`Blend`] and
//! [`Gradient`] only ever see valid colors.

pub mod bezier;
pub mod blended;
pub mod capabilities;
pub mod common;
pub mod hct;
pub mod hsl;
pub mod lab;
pub mod polar;
pub mod registry;
pub mod rgb;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;
use crate::error::{HueError, Result};

pub use capabilities::{Capabilities, Capability};
pub use registry::{Blend, Gradient, MethodInfo, Registry};

/// The color space or algorithm used to blend two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Per-channel linear sRGB; the universal fallback
    Rgb,
    /// HSL with plain numeric hue
    Hsl,
    /// CIELAB
    Lab,
    /// CIE LCh with shortest-arc hue
    Lch,
    /// Material HCT with shortest-arc hue
    Hct,
    /// HCT chroma and tone with the hue of the RGB blend
    HybridHctRgbHue,
    /// OKLab
    Oklab,
    /// OKLCH with shortest-arc hue
    Oklch,
    /// OKLCH and RGB results mixed 70/30
    BlendedOklchRgb,
    /// Bezier curve through LCh control points
    BezierLch,
}

impl InterpolationMethod {
    pub const ALL: [InterpolationMethod; 10] = [
        InterpolationMethod::Rgb,
        InterpolationMethod::Hsl,
        InterpolationMethod::Lab,
        InterpolationMethod::Lch,
        InterpolationMethod::Hct,
        InterpolationMethod::HybridHctRgbHue,
        InterpolationMethod::Oklab,
        InterpolationMethod::Oklch,
        InterpolationMethod::BlendedOklchRgb,
        InterpolationMethod::BezierLch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InterpolationMethod::Rgb => "rgb",
            InterpolationMethod::Hsl => "hsl",
            InterpolationMethod::Lab => "lab",
            InterpolationMethod::Lch => "lch",
            InterpolationMethod::Hct => "hct",
            InterpolationMethod::HybridHctRgbHue => "hybrid_hct_rgb_hue",
            InterpolationMethod::Oklab => "oklab",
            InterpolationMethod::Oklch => "oklch",
            InterpolationMethod::BlendedOklchRgb => "blended_oklch_rgb",
            InterpolationMethod::BezierLch => "bezier_lch",
        }
    }

    /// Capabilities that must all be present for this method to be usable.
    pub fn required_capabilities(&self) -> &'static [Capability] {
        match self {
            InterpolationMethod::Rgb => &[],
            InterpolationMethod::Hsl
            | InterpolationMethod::Lab
            | InterpolationMethod::Lch
            | InterpolationMethod::Oklab
            | InterpolationMethod::Oklch
            | InterpolationMethod::BlendedOklchRgb => &[Capability::ColorSpace],
            InterpolationMethod::Hct | InterpolationMethod::HybridHctRgbHue => {
                &[Capability::Perceptual]
            }
            InterpolationMethod::BezierLch => &[Capability::Curve, Capability::ColorSpace],
        }
    }

    /// The next-simpler method tried when a blend in this one fails.
    pub fn fallback(&self) -> Option<InterpolationMethod> {
        match self {
            InterpolationMethod::Rgb => None,
            InterpolationMethod::BlendedOklchRgb => Some(InterpolationMethod::Oklch),
            InterpolationMethod::BezierLch => Some(InterpolationMethod::Lch),
            _ => Some(InterpolationMethod::Rgb),
        }
    }

    /// This method followed by its fallbacks, ending at RGB.
    pub fn fallback_chain(&self) -> Vec<InterpolationMethod> {
        let mut chain = vec![*self];
        let mut current = *self;
        while let Some(next) = current.fallback() {
            chain.push(next);
            current = next;
        }
        chain
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationMethod {
    type Err = HueError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        InterpolationMethod::ALL
            .into_iter()
            .find(|method| method.name() == normalized)
            .ok_or_else(|| HueError::UnknownMethod {
                name: s.to_string(),
            })
    }
}

/// Trait for color space blending strategies
pub trait Interpolator: Send + Sync {
    /// The method this strategy implements
    fn method(&self) -> InterpolationMethod;

    /// Blend two colors at `t` (clamped to 0..=1)
    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb>;

    /// A native curve through `stops`, to be sampled many times.
    ///
    /// `None` means the strategy has no curve of its own; gradients then join
    /// consecutive stops with this strategy's [`Interpolator::blend`].
    fn curve(&self, _stops: &[Rgb]) -> Result<Option<Box<dyn Curve>>> {
        Ok(None)
    }
}

/// A prepared path through color space, parameterized over 0..=1.
pub trait Curve: Send + Sync {
    fn sample(&self, t: f64) -> Result<Rgb>;
}

/// Get the strategy for a method.
///
/// This does not check availability; go through [`Registry`] for that.
pub fn get_interpolator(method: InterpolationMethod) -> Box<dyn Interpolator> {
    match method {
        InterpolationMethod::Rgb => Box::new(rgb::RgbInterpolator),
        InterpolationMethod::Hsl => Box::new(hsl::HslInterpolator),
        InterpolationMethod::Lab => Box::new(lab::LabInterpolator),
        InterpolationMethod::Oklab => Box::new(lab::OklabInterpolator),
        InterpolationMethod::Lch => Box::new(polar::LchInterpolator),
        InterpolationMethod::Oklch => Box::new(polar::OklchInterpolator),
        InterpolationMethod::Hct => Box::new(hct::HctInterpolator),
        InterpolationMethod::HybridHctRgbHue => Box::new(hct::HybridHctRgbHueInterpolator),
        InterpolationMethod::BlendedOklchRgb => {
            Box::new(blended::BlendedOklchRgbInterpolator::default())
        }
        InterpolationMethod::BezierLch => Box::new(bezier::BezierLchInterpolator),
    }
}
