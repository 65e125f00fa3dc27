//! Fallback comparison: relative distance to a single reference vector
//!
//! Used while no complete baseline exists. Cruder than the enhanced path,
//! so it runs under a stricter threshold.

use std::collections::BTreeMap;

use super::types::{ComparisonMethod, ComparisonResult, DecisionReason, FeatureContribution};
use super::weights::feature_weight;
use crate::constants::FALLBACK_COUNT_TOLERANCE;
use crate::logic::config::EngineConfig;
use crate::logic::features::layout::is_count_feature;
use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};

/// Deviation of one value in 0..=1. Non-finite input saturates.
pub fn relative_deviation(name: &str, candidate: f64, reference: f64) -> f64 {
    let deviation = if is_count_feature(name) {
        (candidate - reference).abs() / FALLBACK_COUNT_TOLERANCE
    } else if reference == 0.0 {
        if candidate == 0.0 { 0.0 } else { 1.0 }
    } else {
        (candidate - reference).abs() / reference.abs()
    };

    if deviation.is_finite() {
        deviation.min(1.0)
    } else {
        1.0
    }
}

pub fn compare_fallback(candidate: &FeatureVector, reference: &FeatureVector, config: &EngineConfig) -> ComparisonResult {
    let mut diagnostics = BTreeMap::new();
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for index in 0..FEATURE_COUNT {
        let name = FEATURE_LAYOUT[index];
        let value = candidate.values[index];
        let reference_value = reference.values[index];
        let deviation = relative_deviation(name, value, reference_value);
        let weight = feature_weight(index);

        weighted += weight * deviation;
        total_weight += weight;

        diagnostics.insert(
            name.to_string(),
            FeatureContribution {
                candidate: value,
                reference: reference_value,
                deviation,
                weight,
                z_score: None,
            },
        );
    }

    let mean_deviation = if total_weight > 0.0 { weighted / total_weight } else { 1.0 };
    let score = (100.0 * (1.0 - mean_deviation)).clamp(0.0, 100.0);
    let threshold = config.fallback_accept_threshold;
    let success = score >= threshold;

    ComparisonResult {
        success,
        score,
        method: ComparisonMethod::Fallback,
        threshold,
        reason: if success { DecisionReason::Accepted } else { DecisionReason::BelowThreshold },
        diagnostics,
    }
}
