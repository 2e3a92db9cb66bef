//! Runtime capability probing.
//!
//! Some methods depend on color-model support that a deployment may switch
//! off. Availability is decided once when the [`Registry`](super::Registry)
//! is built and never changes afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::InterpolationMethod;
use crate::error::{HueError, Result};

/// A piece of color-model support a method may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Conversions through HSL, CIELAB/LCh and OKLab/OKLCH
    ColorSpace,
    /// The HCT color model
    Perceptual,
    /// Bezier curves through color space
    Curve,
}

impl Capability {
    pub fn name(&self) -> &'static str {
        match self {
            Capability::ColorSpace => "color_space",
            Capability::Perceptual => "perceptual",
            Capability::Curve => "curve",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Capability {
    type Err = HueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "color_space" => Ok(Capability::ColorSpace),
            "perceptual" => Ok(Capability::Perceptual),
            "curve" => Ok(Capability::Curve),
            _ => Err(HueError::InvalidParameter {
                param: "capability".to_string(),
                message: format!(
                    "unknown capability '{}'. Must be one of: color_space, perceptual, curve",
                    s
                ),
            }),
        }
    }
}

/// The set of capabilities present in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default = "enabled")]
    pub color_space: bool,
    #[serde(default = "enabled")]
    pub perceptual: bool,
    #[serde(default = "enabled")]
    pub curve: bool,
}

fn enabled() -> bool {
    true
}

impl Capabilities {
    pub const fn all() -> Self {
        Self {
            color_space: true,
            perceptual: true,
            curve: true,
        }
    }

    /// Only plain RGB blending works.
    pub const fn rgb_only() -> Self {
        Self {
            color_space: false,
            perceptual: false,
            curve: false,
        }
    }

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::ColorSpace => self.color_space,
            Capability::Perceptual => self.perceptual,
            Capability::Curve => self.curve,
        }
    }

    /// A copy with `capability` switched off.
    pub fn without(mut self, capability: Capability) -> Self {
        match capability {
            Capability::ColorSpace => self.color_space = false,
            Capability::Perceptual => self.perceptual = false,
            Capability::Curve => self.curve = false,
        }
        self
    }

    /// Whether every capability `method` needs is present.
    pub fn allows(&self, method: InterpolationMethod) -> bool {
        method
            .required_capabilities()
            .iter()
            .all(|capability| self.supports(*capability))
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}
