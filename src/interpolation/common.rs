//! Common utilities for interpolation strategies.
//!
//! This module provides shared functionality used by the color space
//! interpolators: scalar and angular lerps, and the piecewise curve that
//! every non-Bezier method uses for multi-stop gradients.

use crate::color::Rgb;
use crate::error::{HueError, Result};

use std::sync::Arc;

use super::{Curve, Interpolator};

/// Chroma (or saturation) below which a hue angle carries no information.
pub const ACHROMATIC_EPSILON: f64 = 1e-4;

/// Clamp a blend factor into 0..=1. NaN is treated as 0.
pub fn clamp_t(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Linear interpolation between two numbers, with `t` clamped.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let t = clamp_t(t);
    a * (1.0 - t) + b * t
}

/// Wrap an angle into 0..360 degrees.
pub fn normalize_hue(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed hue difference along the shorter arc, in -180..=180.
pub fn shortest_hue_delta(from: f64, to: f64) -> f64 {
    let mut delta = to - from;
    if delta.abs() > 180.0 {
        delta -= 360.0 * delta.signum();
    }
    delta
}

/// Interpolate hue angles along the shorter arc.
pub fn lerp_hue_shortest(from: f64, to: f64, t: f64) -> f64 {
    normalize_hue(from + shortest_hue_delta(from, to) * clamp_t(t) + 360.0)
}

/// Replace the hue of an achromatic endpoint with the other endpoint's, so a
/// blend toward gray does not sweep through unrelated hues.
pub fn carry_hue(hue_a: f64, chroma_a: f64, hue_b: f64, chroma_b: f64) -> (f64, f64) {
    match (chroma_a < ACHROMATIC_EPSILON, chroma_b < ACHROMATIC_EPSILON) {
        (true, false) => (hue_b, hue_b),
        (false, true) => (hue_a, hue_a),
        _ => (hue_a, hue_b),
    }
}

/// Reject results that are not usable as colors.
pub fn ensure_finite(rgb: Rgb, space: &str) -> Result<Rgb> {
    if rgb.is_finite() {
        Ok(rgb)
    } else {
        Err(HueError::conversion(space, format!("non-finite result {:?}", rgb)))
    }
}

/// Consecutive stops joined by a strategy's two-point blend.
pub struct PolylineCurve {
    interpolator: Arc<dyn Interpolator>,
    stops: Vec<Rgb>,
}

impl PolylineCurve {
    pub fn new(interpolator: Arc<dyn Interpolator>, stops: &[Rgb]) -> Result<Self> {
        if stops.len() < 2 {
            return Err(HueError::Curve {
                message: format!("a curve needs at least 2 stops, got {}", stops.len()),
            });
        }
        Ok(Self {
            interpolator,
            stops: stops.to_vec(),
        })
    }
}

impl Curve for PolylineCurve {
    fn sample(&self, t: f64) -> Result<Rgb> {
        let t = clamp_t(t);
        let segments = self.stops.len() - 1;
        let position = t * segments as f64;
        let segment = (position.floor() as usize).min(segments - 1);
        let local_t = position - segment as f64;

        self.interpolator
            .blend(self.stops[segment], self.stops[segment + 1], local_t)
    }
}
