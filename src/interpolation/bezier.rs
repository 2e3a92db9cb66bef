//! Bezier curves in CIE LCh.
//!
//! The control points are the stops' LCh coordinates. Hue is unwrapped so
//! each consecutive pair of control points is joined along the shorter arc,
//! and the curve is evaluated with De Casteljau's algorithm. With two stops the
//! curve is the straight LCh line; with more stops it bends smoothly toward
//! the inner stops instead of passing through them.

use super::common::{clamp_t, normalize_hue, shortest_hue_delta, ACHROMATIC_EPSILON};
use super::polar::{from_lch, to_lch};
use super::{Curve, InterpolationMethod, Interpolator};
use crate::color::Rgb;
use crate::error::{HueError, Result};

/// Bezier blend through LCh control points
pub struct BezierLchInterpolator;

impl Interpolator for BezierLchInterpolator {
    fn method(&self) -> InterpolationMethod {
        InterpolationMethod::BezierLch
    }

    fn blend(&self, a: Rgb, b: Rgb, t: f64) -> Result<Rgb> {
        BezierCurve::new(&[a, b])?.sample(t)
    }

    fn curve(&self, stops: &[Rgb]) -> Result<Option<Box<dyn Curve>>> {
        Ok(Some(Box::new(BezierCurve::new(stops)?)))
    }
}

/// A Bezier curve with hue-unwrapped LCh control points.
#[derive(Debug, Clone)]
pub struct BezierCurve {
    control_points: Vec<[f64; 3]>,
}

impl BezierCurve {
    pub fn new(stops: &[Rgb]) -> Result<Self> {
        if stops.len() < 2 {
            return Err(HueError::Curve {
                message: format!("a Bezier curve needs at least 2 stops, got {}", stops.len()),
            });
        }

        let mut points: Vec<[f64; 3]> = stops.iter().map(|rgb| to_lch(*rgb)).collect();
        if let Some(bad) = points.iter().find(|p| p.iter().any(|c| !c.is_finite())) {
            return Err(HueError::Curve {
                message: format!("control point is not finite: {:?}", bad),
            });
        }

        fill_achromatic_hues(&mut points);
        unwrap_hues(&mut points);

        Ok(Self {
            control_points: points,
        })
    }

    fn evaluate(&self, t: f64) -> [f64; 3] {
        let mut points = self.control_points.clone();
        for level in (1..points.len()).rev() {
            for i in 0..level {
                for axis in 0..3 {
                    points[i][axis] = points[i][axis] * (1.0 - t) + points[i + 1][axis] * t;
                }
            }
        }
        points[0]
    }
}

impl Curve for BezierCurve {
    fn sample(&self, t: f64) -> Result<Rgb> {
        let [l, chroma, hue] = self.evaluate(clamp_t(t));
        if !(l.is_finite() && chroma.is_finite() && hue.is_finite()) {
            return Err(HueError::Curve {
                message: format!("sample at t={} is not finite", t),
            });
        }
        from_lch([l, chroma.max(0.0), normalize_hue(hue)])
    }
}

/// Give achromatic control points the hue of the nearest chromatic one
/// (earlier points win ties).
fn fill_achromatic_hues(points: &mut [[f64; 3]]) {
    let chromatic: Vec<usize> = (0..points.len())
        .filter(|&i| points[i][1] >= ACHROMATIC_EPSILON)
        .collect();
    if chromatic.is_empty() {
        return;
    }

    for i in 0..points.len() {
        if points[i][1] >= ACHROMATIC_EPSILON {
            continue;
        }
        let nearest = chromatic
            .iter()
            .min_by_key(|&&j| (j as isize - i as isize).unsigned_abs())
            .copied()
            .unwrap_or(i);
        points[i][2] = points[nearest][2];
    }
}

/// Rewrite hues so every step between neighbors is the short way round.
/// Values may leave 0..360; samples are normalized afterwards.
fn unwrap_hues(points: &mut [[f64; 3]]) {
    for i in 1..points.len() {
        let previous = points[i - 1][2];
        points[i][2] = previous + shortest_hue_delta(normalize_hue(previous), points[i][2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{decode, Color};
    use crate::interpolation::polar::LchInterpolator;

    #[test]
    fn test_two_stops_match_linear_lch() {
        let (a, b) = (decode("#9c27b0").unwrap(), decode("#ffeb3b").unwrap());
        for t in [0.0, 0.2, 0.5, 0.8, 1.0] {
            let bezier = Color::from_rgb(BezierLchInterpolator.blend(a, b, t).unwrap());
            let linear = Color::from_rgb(LchInterpolator.blend(a, b, t).unwrap());
            assert_eq!(bezier, linear, "t = {t}");
        }
    }

    #[test]
    fn test_three_stops_weight_the_middle() {
        let stops = [
            decode("#000000").unwrap(),
            decode("#777777").unwrap(),
            decode("#ffffff").unwrap(),
        ];
        let curve = BezierCurve::new(&stops).unwrap();
        assert_eq!(Color::from_rgb(curve.sample(0.5).unwrap()).to_string(), "#777777");
        assert_eq!(Color::from_rgb(curve.sample(0.0).unwrap()).to_string(), "#000000");
        assert_eq!(Color::from_rgb(curve.sample(1.0).unwrap()).to_string(), "#ffffff");
    }

    #[test]
    fn test_hue_unwrap_takes_short_steps() {
        let mut points = [[50.0, 30.0, 350.0], [50.0, 30.0, 20.0], [50.0, 30.0, 80.0]];
        unwrap_hues(&mut points);
        assert_eq!(points[1][2], 380.0);
        assert_eq!(points[2][2], 440.0);
    }

    #[test]
    fn test_achromatic_points_borrow_hue() {
        let mut points = [[0.0, 0.0, 0.0], [50.0, 30.0, 120.0], [100.0, 0.0, 0.0]];
        fill_achromatic_hues(&mut points);
        assert_eq!(points[0][2], 120.0);
        assert_eq!(points[2][2], 120.0);
    }

    #[test]
    fn test_needs_two_stops() {
        assert!(BezierCurve::new(&[decode("#ffffff").unwrap()]).is_err());
    }
}
