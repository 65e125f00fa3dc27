//! Velocity Feature Extraction
//!
//! Instantaneous speed per consecutive point pair, within each stroke.
//! A segment with `Δt <= 0` contributes speed 0; strokes with fewer than
//! two points contribute no segments at all.

use super::guard::{finite_or, on_values, AnalysisInput};
use super::layout::FEATURE_DEFAULT;
use super::stats;
use crate::logic::stroke::Stroke;

/// Speeds (px/ms) of every segment in every stroke
pub fn segment_speeds(strokes: &[Stroke]) -> Vec<f64> {
    strokes
        .iter()
        .flat_map(|s| s.points.windows(2))
        .map(|w| {
            let dt = w[1].t.saturating_sub(w[0].t);
            if dt <= 0 {
                0.0
            } else {
                finite_or(w[0].distance(&w[1]) / dt as f64, 0.0)
            }
        })
        .collect()
}

fn speed_stat(input: &AnalysisInput<'_>, stat: fn(&[f64]) -> Option<f64>) -> f64 {
    on_values(&segment_speeds(input.strokes), 1, |speeds| stat(speeds).unwrap_or(FEATURE_DEFAULT))
}

pub fn avg_velocity(input: &AnalysisInput<'_>) -> f64 {
    speed_stat(input, stats::mean)
}

pub fn max_velocity(input: &AnalysisInput<'_>) -> f64 {
    speed_stat(input, stats::max)
}

pub fn min_velocity(input: &AnalysisInput<'_>) -> f64 {
    speed_stat(input, stats::min)
}

pub fn velocity_std(input: &AnalysisInput<'_>) -> f64 {
    speed_stat(input, stats::std_dev)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::stroke::{DeviceCapabilities, Point};

    #[test]
    fn test_segment_speeds() {
        let strokes = vec![Stroke::new(vec![
            Point::new(0.0, 0.0, 0),
            Point::new(3.0, 4.0, 10),  // 5px / 10ms
            Point::new(3.0, 4.0, 20),  // stationary
        ])];
        assert_eq!(segment_speeds(&strokes), vec![0.5, 0.0]);
    }

    #[test]
    fn test_zero_dt_is_zero_speed() {
        let strokes = vec![Stroke::new(vec![
            Point::new(0.0, 0.0, 5),
            Point::new(100.0, 0.0, 5),
            Point::new(200.0, 0.0, 4),
        ])];
        assert_eq!(segment_speeds(&strokes), vec![0.0, 0.0]);
    }

    #[test]
    fn test_single_point_strokes_have_no_segments() {
        let strokes = vec![
            Stroke::new(vec![Point::new(1.0, 1.0, 0)]),
            Stroke::default(),
        ];
        let input = AnalysisInput::new(&strokes, DeviceCapabilities::default());
        assert!(segment_speeds(&strokes).is_empty());
        assert_eq!(avg_velocity(&input), 0.0);
        assert_eq!(max_velocity(&input), 0.0);
        assert_eq!(min_velocity(&input), 0.0);
        assert_eq!(velocity_std(&input), 0.0);
    }

    #[test]
    fn test_stats_across_strokes() {
        let strokes = vec![
            Stroke::new(vec![Point::new(0.0, 0.0, 0), Point::new(10.0, 0.0, 10)]), // 1.0
            Stroke::new(vec![Point::new(0.0, 0.0, 0), Point::new(30.0, 0.0, 10)]), // 3.0
        ];
        let input = AnalysisInput::new(&strokes, DeviceCapabilities::default());
        assert_eq!(avg_velocity(&input), 2.0);
        assert_eq!(max_velocity(&input), 3.0);
        assert_eq!(min_velocity(&input), 1.0);
        assert_eq!(velocity_std(&input), 1.0);
    }
}
