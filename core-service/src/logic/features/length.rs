//! Per-stroke length & duration statistics
//!
//! Every stroke contributes, including empty ones (length 0, duration 0).

use super::guard::{on_values, AnalysisInput};
use super::layout::FEATURE_DEFAULT;
use super::stats;

fn lengths(input: &AnalysisInput<'_>) -> Vec<f64> {
    input.strokes.iter().map(|s| s.path_length()).collect()
}

fn durations(input: &AnalysisInput<'_>) -> Vec<f64> {
    input.strokes.iter().map(|s| s.duration_ms() as f64).collect()
}

fn stroke_stat(values: &[f64], stat: fn(&[f64]) -> Option<f64>) -> f64 {
    on_values(values, 1, |values| stat(values).unwrap_or(FEATURE_DEFAULT))
}

pub fn avg_stroke_length(input: &AnalysisInput<'_>) -> f64 {
    stroke_stat(&lengths(input), stats::mean)
}

pub fn total_length(input: &AnalysisInput<'_>) -> f64 {
    on_values(&lengths(input), 1, |lengths| lengths.iter().sum())
}

pub fn length_variation(input: &AnalysisInput<'_>) -> f64 {
    stroke_stat(&lengths(input), stats::std_dev)
}

pub fn avg_stroke_duration(input: &AnalysisInput<'_>) -> f64 {
    stroke_stat(&durations(input), stats::mean)
}

pub fn duration_variation(input: &AnalysisInput<'_>) -> f64 {
    stroke_stat(&durations(input), stats::std_dev)
}
