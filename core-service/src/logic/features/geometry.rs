//! Drawing Geometry Features (first stroke)
//!
//! Curve, radial, corner and straightness analyses. All of them read the
//! first stroke through `on_points`, so a missing or short stroke yields 0.

use std::f64::consts::{PI, TAU};

use super::guard::{on_points, safe_ratio, AnalysisInput, GEOMETRY_EPSILON};
use super::layout::FEATURE_DEFAULT;
use super::stats;
use crate::constants::CORNER_ANGLE_THRESHOLD;
use crate::logic::stroke::Point;

// ============================================================================
// HELPERS
// ============================================================================

/// Signed turning angle (radians, -π..=π) at every interior point
pub fn turning_angles(points: &[Point]) -> Vec<f64> {
    points
        .windows(3)
        .map(|w| {
            let a1 = (w[1].y - w[0].y).atan2(w[1].x - w[0].x);
            let a2 = (w[2].y - w[1].y).atan2(w[2].x - w[1].x);
            wrap_angle(a2 - a1)
        })
        .collect()
}

fn wrap_angle(mut angle: f64) -> f64 {
    if angle > PI {
        angle -= TAU;
    } else if angle < -PI {
        angle += TAU;
    }
    angle
}

fn centroid(points: &[Point]) -> (f64, f64) {
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    (sx / n, sy / n)
}

/// Indices of corner peaks: local maxima of |turn| at or above the threshold
fn corner_peaks(turns: &[f64]) -> Vec<usize> {
    let abs: Vec<f64> = turns.iter().map(|t| t.abs()).collect();

    (0..abs.len())
        .filter(|&i| {
            let rises = i == 0 || abs[i] > abs[i - 1];
            let holds = i + 1 == abs.len() || abs[i] >= abs[i + 1];
            abs[i] >= CORNER_ANGLE_THRESHOLD && rises && holds
        })
        .collect()
}

// ============================================================================
// ANALYSES
// ============================================================================

/// Σ|turning angle| / (points - 2); 0 below three points
pub fn curve_smoothness(input: &AnalysisInput<'_>) -> f64 {
    on_points(input.first_points(), 3, |points| {
        let segments = points.len().saturating_sub(2);
        if segments == 0 {
            return FEATURE_DEFAULT;
        }
        let total: f64 = turning_angles(points).iter().map(|t| t.abs()).sum();
        total / segments as f64
    })
}

/// Coefficient of variation of the distance to the centroid.
/// 0 when every point sits on the centroid.
pub fn radial_deviation(input: &AnalysisInput<'_>) -> f64 {
    on_points(input.first_points(), 1, |points| {
        let (cx, cy) = centroid(points);
        let radii: Vec<f64> = points.iter().map(|p| (p.x - cx).hypot(p.y - cy)).collect();

        match (stats::mean(&radii), stats::std_dev(&radii)) {
            (Some(mean), Some(std)) if mean > GEOMETRY_EPSILON => std / mean,
            _ => FEATURE_DEFAULT,
        }
    })
}

/// Share of total turning concentrated at corner peaks.
/// Near 1: sharp corners drawn in one turn. Near 0: rounded corners.
pub fn corner_sharpness(input: &AnalysisInput<'_>) -> f64 {
    on_points(input.first_points(), 1, |points| {
        let turns = turning_angles(points);
        let total: f64 = turns.iter().map(|t| t.abs()).sum();
        let at_peaks: f64 = corner_peaks(&turns).iter().map(|&i| turns[i].abs()).sum();
        safe_ratio(at_peaks, total)
    })
}

pub fn corner_count(input: &AnalysisInput<'_>) -> f64 {
    on_points(input.first_points(), 1, |points| {
        corner_peaks(&turning_angles(points)).len() as f64
    })
}

/// Spread across the best-fit line relative to spread along it:
/// √(minor / major) eigenvalue of the point covariance. 0 = perfectly straight.
pub fn line_consistency(input: &AnalysisInput<'_>) -> f64 {
    on_points(input.first_points(), 1, |points| {
        let n = points.len() as f64;
        let (cx, cy) = centroid(points);

        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for p in points {
            let (dx, dy) = (p.x - cx, p.y - cy);
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }
        let (sxx, syy, sxy) = (sxx / n, syy / n, sxy / n);

        let half_trace = (sxx + syy) / 2.0;
        let spread = ((sxx - syy).powi(2) / 4.0 + sxy * sxy).sqrt();
        let major = half_trace + spread;
        let minor = (half_trace - spread).max(0.0);

        if major <= GEOMETRY_EPSILON {
            FEATURE_DEFAULT
        } else {
            (minor / major).sqrt()
        }
    })
}

/// Gap between first and last point over the path length.
/// ~0 for closed shapes, 1 for a straight stroke.
pub fn closure_ratio(input: &AnalysisInput<'_>) -> f64 {
    on_points(input.first_points(), 2, |points| {
        let length: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
        let (first, last) = (&points[0], &points[points.len() - 1]);
        safe_ratio(first.distance(last), length)
    })
}
