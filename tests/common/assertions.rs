//! Assertion utilities for testing.
//!
//! Helpers for comparing colors and hues, where exact equality is either too
//! strict (floating-point color math) or needs wraparound.

use huecraft::Color;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that every channel of `actual` is within `tolerance` of `expected`.
///
/// Both colors are hex strings.
pub fn assert_color_near(actual: &str, expected: &str, tolerance: u8) {
    let a: Color = actual.parse().expect("actual is not a hex color");
    let e: Color = expected.parse().expect("expected is not a hex color");

    for (channel, (x, y)) in a.bytes().iter().zip(e.bytes().iter()).enumerate() {
        assert!(
            x.abs_diff(*y) <= tolerance,
            "Colors differ in channel {}: actual = {}, expected = {}, tolerance = {}",
            channel,
            actual,
            expected,
            tolerance
        );
    }
}

/// Assert that `hue` lies on the arc going counter-clockwise from `from` to `to`, in degrees.
pub fn assert_hue_on_arc(hue: f64, from: f64, to: f64) {
    let span = (to - from).rem_euclid(360.0);
    let offset = (hue - from).rem_euclid(360.0);

    assert!(
        offset <= span + 1e-6,
        "Hue {} is not on the arc from {} to {}",
        hue,
        from,
        to
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0000001, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_color_near() {
        assert_color_near("#808080", "#808080", 0);
        assert_color_near("#7f8081", "#808080", 1);
    }

    #[test]
    fn test_assert_hue_on_arc() {
        assert_hue_on_arc(355.0, 350.0, 10.0);
        assert_hue_on_arc(5.0, 350.0, 10.0);
        assert_hue_on_arc(20.0, 10.0, 30.0);
    }
}
