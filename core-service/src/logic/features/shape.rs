//! Shape Feature Extraction
//!
//! Bounding box over all points of all strokes.

use super::guard::{on_points, AnalysisInput};
use super::layout::FEATURE_DEFAULT;
use crate::logic::stroke::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Bounding box, `None` when the sample has no points
pub fn bounds(input: &AnalysisInput<'_>) -> Option<Bounds> {
    bounds_of(input.all_points())
}

fn bounds_of<'p>(points: impl IntoIterator<Item = &'p Point>) -> Option<Bounds> {
    points.into_iter().fold(None, |acc, p| {
        Some(match acc {
            None => Bounds { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y },
            Some(b) => Bounds {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        })
    })
}

fn on_bounds(input: &AnalysisInput<'_>, f: impl FnOnce(Bounds) -> f64) -> f64 {
    let points: Vec<Point> = input.all_points().copied().collect();
    on_points(Some(&points), 1, |points| bounds_of(points).map(f).unwrap_or(FEATURE_DEFAULT))
}

pub fn width(input: &AnalysisInput<'_>) -> f64 {
    on_bounds(input, |b| b.width())
}

pub fn height(input: &AnalysisInput<'_>) -> f64 {
    on_bounds(input, |b| b.height())
}

pub fn area(input: &AnalysisInput<'_>) -> f64 {
    on_bounds(input, |b| b.width() * b.height())
}

/// width / height; 0 when height is 0
pub fn aspect_ratio(input: &AnalysisInput<'_>) -> f64 {
    on_bounds(input, |b| {
        if b.height() > 0.0 {
            b.width() / b.height()
        } else {
            FEATURE_DEFAULT
        }
    })
}

pub fn center_x(input: &AnalysisInput<'_>) -> f64 {
    on_bounds(input, |b| (b.min_x + b.max_x) / 2.0)
}

pub fn center_y(input: &AnalysisInput<'_>) -> f64 {
    on_bounds(input, |b| (b.min_y + b.max_y) / 2.0)
}
