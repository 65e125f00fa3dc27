//! Basic sample statistics: stroke/point counts and overall duration

use super::guard::{safe_ratio, AnalysisInput};

pub fn stroke_count(input: &AnalysisInput<'_>) -> f64 {
    input.strokes.len() as f64
}

pub fn total_points(input: &AnalysisInput<'_>) -> f64 {
    input.strokes.iter().map(|s| s.len()).sum::<usize>() as f64
}

/// Pen-down of the first stroke to pen-up of the last stroke when the client
/// reported both. Otherwise first timestamp of the first non-empty stroke to
/// the last timestamp of the last non-empty stroke.
/// 0 when there are no points or time runs backwards.
pub fn total_duration_ms(input: &AnalysisInput<'_>) -> f64 {
    let reported = input
        .strokes
        .first()
        .and_then(|s| s.start_time)
        .zip(input.strokes.last().and_then(|s| s.end_time));
    if let Some((start, end)) = reported {
        return end.saturating_sub(start).max(0) as f64;
    }

    let start = input.strokes.iter().find_map(|s| s.points.first());
    let end = input.strokes.iter().rev().find_map(|s| s.points.last());

    match (start, end) {
        (Some(start), Some(end)) => end.t.saturating_sub(start.t).max(0) as f64,
        _ => 0.0,
    }
}

pub fn avg_points_per_stroke(input: &AnalysisInput<'_>) -> f64 {
    safe_ratio(total_points(input), stroke_count(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::stroke::{DeviceCapabilities, Point, Stroke};

    fn input(strokes: &[Stroke]) -> AnalysisInput<'_> {
        AnalysisInput::new(strokes, DeviceCapabilities::default())
    }

    #[test]
    fn test_counts() {
        let strokes = vec![
            Stroke::new(vec![Point::new(0.0, 0.0, 0), Point::new(1.0, 0.0, 10)]),
            Stroke::new(vec![Point::new(0.0, 0.0, 30)]),
        ];
        let input = input(&strokes);
        assert_eq!(stroke_count(&input), 2.0);
        assert_eq!(total_points(&input), 3.0);
        assert_eq!(avg_points_per_stroke(&input), 1.5);
    }

    #[test]
    fn test_duration_skips_empty_strokes() {
        let strokes = vec![
            Stroke::default(),
            Stroke::new(vec![Point::new(0.0, 0.0, 100), Point::new(1.0, 0.0, 150)]),
            Stroke::new(vec![Point::new(0.0, 0.0, 200), Point::new(1.0, 0.0, 260)]),
            Stroke::default(),
        ];
        assert_eq!(total_duration_ms(&input(&strokes)), 160.0);
    }

    #[test]
    fn test_duration_uses_reported_stroke_times() {
        let strokes = vec![
            Stroke::new(vec![Point::new(0.0, 0.0, 0), Point::new(1.0, 0.0, 10)]).with_timing(Some(1_000), Some(1_400)),
            Stroke::new(vec![Point::new(0.0, 0.0, 20), Point::new(1.0, 0.0, 30)]).with_timing(Some(1_600), Some(2_200)),
        ];
        assert_eq!(total_duration_ms(&input(&strokes)), 1_200.0);

        // Last stroke without a pen-up time: point timestamps
        let strokes = vec![
            strokes[0].clone(),
            Stroke::new(vec![Point::new(0.0, 0.0, 20), Point::new(1.0, 0.0, 30)]),
        ];
        assert_eq!(total_duration_ms(&input(&strokes)), 30.0);
    }

    #[test]
    fn test_empty_sample() {
        let input = input(&[]);
        assert_eq!(stroke_count(&input), 0.0);
        assert_eq!(total_duration_ms(&input), 0.0);
        assert_eq!(avg_points_per_stroke(&input), 0.0);
    }
}
