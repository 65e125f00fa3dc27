//! Pressure Feature Extraction
//!
//! Only computed when the capture device reports pressure support.
//! Mouse/touch samples keep the default 0 so the schema stays fixed.

use super::guard::{with_valid, AnalysisInput};
use super::layout::FEATURE_DEFAULT;
use super::stats;

fn pressures(input: &AnalysisInput<'_>) -> Option<Vec<f64>> {
    if !input.capabilities.supports_pressure {
        return None;
    }
    let values: Vec<f64> = input
        .all_points()
        .filter_map(|p| p.pressure)
        .filter(|p| p.is_finite())
        .collect();
    Some(values)
}

fn pressure_stat(input: &AnalysisInput<'_>, stat: fn(&[f64]) -> Option<f64>) -> f64 {
    with_valid(pressures(input).as_deref(), 1, FEATURE_DEFAULT, |values| {
        stat(values).unwrap_or(FEATURE_DEFAULT)
    })
}

pub fn avg_pressure(input: &AnalysisInput<'_>) -> f64 {
    pressure_stat(input, stats::mean)
}

pub fn pressure_std(input: &AnalysisInput<'_>) -> f64 {
    pressure_stat(input, stats::std_dev)
}
