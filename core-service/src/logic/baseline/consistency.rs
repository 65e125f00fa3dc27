//! Consistency Analysis
//!
//! How much a user's genuine samples vary. Used to tune thresholds per user;
//! never feeds the accept/reject decision.

use super::types::ConsistencyReport;
use crate::logic::features::stats;
use crate::logic::features::FeatureVector;

/// `1 - std/mean` of one feature across samples (zero mean counts as stable)
fn feature_consistency(vectors: &[FeatureVector], name: &str) -> f64 {
    let values: Vec<f64> = vectors
        .iter()
        .filter_map(|v| v.get_by_name(name))
        .collect();

    match (stats::mean(&values), stats::std_dev(&values)) {
        (Some(mean), Some(std)) if mean > 0.0 => 1.0 - std / mean,
        _ => 1.0,
    }
}

/// Requires at least two samples
pub fn analyze_consistency(vectors: &[FeatureVector]) -> Option<ConsistencyReport> {
    if vectors.len() < 2 {
        log::debug!("Consistency needs at least 2 samples, got {}", vectors.len());
        return None;
    }

    Some(ConsistencyReport {
        velocity_consistency: feature_consistency(vectors, "avg_velocity"),
        stroke_count_consistency: feature_consistency(vectors, "stroke_count"),
        area_consistency: feature_consistency(vectors, "area"),
        sample_count: vectors.len(),
    })
}
