//! Input guards for analyses
//!
//! Every analysis goes through these helpers so degenerate input always
//! maps to the documented default instead of a panic or a non-finite value.

use crate::logic::stroke::{DeviceCapabilities, Point, Stroke};

use super::layout::FEATURE_DEFAULT;

/// Below this, a length or radius is treated as zero
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// Normalized input handed to every analysis
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub strokes: &'a [Stroke],
    pub capabilities: DeviceCapabilities,
}

impl<'a> AnalysisInput<'a> {
    pub fn new(strokes: &'a [Stroke], capabilities: DeviceCapabilities) -> Self {
        Self { strokes, capabilities }
    }

    /// Points of the first stroke, if there is a first stroke
    pub fn first_points(&self) -> Option<&'a [Point]> {
        self.strokes.first().map(|s| s.points.as_slice())
    }

    /// Every point of every stroke, in order
    pub fn all_points(&self) -> impl Iterator<Item = &'a Point> + 'a {
        let strokes: &'a [Stroke] = self.strokes;
        strokes.iter().flat_map(|s| s.points.iter())
    }
}

/// Run `f` only when `items` exists and holds at least `min_count` entries.
/// Otherwise, or when `f` produces a non-finite value, return `default`.
pub fn with_valid<T, F>(items: Option<&[T]>, min_count: usize, default: f64, f: F) -> f64
where
    F: FnOnce(&[T]) -> f64,
{
    match items {
        Some(items) if items.len() >= min_count => finite_or(f(items), default),
        _ => default,
    }
}

/// `with_valid` over a point slice
pub fn with_valid_points<F>(points: Option<&[Point]>, min_count: usize, default: f64, f: F) -> f64
where
    F: FnOnce(&[Point]) -> f64,
{
    with_valid(points, min_count, default, f)
}

/// Same as `with_valid_points` with `FEATURE_DEFAULT`
pub fn on_points<F>(points: Option<&[Point]>, min_count: usize, f: F) -> f64
where
    F: FnOnce(&[Point]) -> f64,
{
    with_valid_points(points, min_count, FEATURE_DEFAULT, f)
}

/// `with_valid` over derived per-segment or per-stroke values, with `FEATURE_DEFAULT`
pub fn on_values<F>(values: &[f64], min_count: usize, f: F) -> f64
where
    F: FnOnce(&[f64]) -> f64,
{
    with_valid(Some(values), min_count, FEATURE_DEFAULT, f)
}

/// Replace a non-finite value with `default`
pub fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

/// `numerator / denominator`, or the default when the denominator is ~0
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() <= GEOMETRY_EPSILON {
        FEATURE_DEFAULT
    } else {
        finite_or(numerator / denominator, FEATURE_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0, i as i64)).collect()
    }

    #[test]
    fn test_missing_points_use_default() {
        assert_eq!(with_valid_points(None, 1, -1.0, |_| 5.0), -1.0);
    }

    #[test]
    fn test_too_few_points_use_default() {
        let points = pts(2);
        assert_eq!(with_valid_points(Some(&points), 3, 0.0, |_| 5.0), 0.0);
        assert_eq!(with_valid_points(Some(&points), 2, 0.0, |p| p.len() as f64), 2.0);
    }

    #[test]
    fn test_non_finite_result_uses_default() {
        let points = pts(3);
        assert_eq!(on_points(Some(&points), 1, |_| f64::NAN), FEATURE_DEFAULT);
        assert_eq!(on_points(Some(&points), 1, |_| f64::INFINITY), FEATURE_DEFAULT);
    }

    #[test]
    fn test_values_guard() {
        assert_eq!(on_values(&[], 1, |_| 5.0), FEATURE_DEFAULT);
        assert_eq!(on_values(&[1.0, 3.0], 1, |v| v.iter().sum()), 4.0);
        assert_eq!(on_values(&[f64::MAX, f64::MAX], 1, |v| v.iter().sum()), FEATURE_DEFAULT);
        assert_eq!(with_valid::<f64, _>(None, 0, -1.0, |_| 5.0), -1.0);
    }

    #[test]
    fn test_safe_ratio() {
        assert_eq!(safe_ratio(1.0, 0.0), FEATURE_DEFAULT);
        assert_eq!(safe_ratio(1.0, 4.0), 0.25);
    }

    #[test]
    fn test_first_points() {
        let strokes = vec![Stroke::new(pts(2)), Stroke::new(pts(5))];
        let input = AnalysisInput::new(&strokes, DeviceCapabilities::default());
        assert_eq!(input.first_points().map(|p| p.len()), Some(2));
        assert_eq!(input.all_points().count(), 7);

        let empty: Vec<Stroke> = Vec::new();
        let input = AnalysisInput::new(&empty, DeviceCapabilities::default());
        assert!(input.first_points().is_none());
    }
}
