//! Enhanced comparison: capped z-scores against a complete baseline
//!
//! scale = max(std, min_std_ratio * |mean|, std_epsilon)
//! z     = min(|candidate - mean| / scale, z_cap)
//! score = 100 * (1 - weighted RMS of z / z_cap)
//!
//! The std floor keeps a zero-variance enrollment from turning tiny
//! jitter into a maximal deviation. A primary feature whose scale sits on
//! the absolute `std_epsilon` floor (mean and spread both ~0) still
//! contributes to the score but never vetoes the sample.

use std::collections::BTreeMap;

use super::types::{ComparisonMethod, ComparisonResult, DecisionReason, FeatureContribution};
use super::weights::{feature_weight, is_primary_index};
use crate::logic::baseline::EnrollmentBaseline;
use crate::logic::config::EngineConfig;
use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};

/// Deviation scale of one feature, and whether it fell through to the
/// absolute epsilon floor
fn feature_scale(mean: f64, std: f64, config: &EngineConfig) -> (f64, bool) {
    let spread = std.max(config.min_std_ratio * mean.abs());
    if spread >= config.std_epsilon {
        (spread, false)
    } else {
        (config.std_epsilon, true)
    }
}

/// Capped z-score of one value. Non-finite input saturates.
pub fn capped_z(candidate: f64, mean: f64, std: f64, config: &EngineConfig) -> f64 {
    let (scale, _) = feature_scale(mean, std, config);
    let z = (candidate - mean).abs() / scale;

    if z.is_finite() {
        z.min(config.z_cap)
    } else {
        config.z_cap
    }
}

pub fn compare_enhanced(candidate: &FeatureVector, baseline: &EnrollmentBaseline, config: &EngineConfig) -> ComparisonResult {
    let mut diagnostics = BTreeMap::new();
    let mut weighted_sq = 0.0;
    let mut total_weight = 0.0;
    let mut critical: Option<&'static str> = None;

    for index in 0..FEATURE_COUNT {
        let name = FEATURE_LAYOUT[index];
        let value = candidate.values[index];
        let mean = baseline.mean.values[index];
        let std = baseline.std.values[index];
        let z = capped_z(value, mean, std, config);
        let deviation = z / config.z_cap;
        let weight = feature_weight(index);

        weighted_sq += weight * deviation * deviation;
        total_weight += weight;

        if critical.is_none() && z >= config.z_cap && is_primary_index(index) {
            let (_, epsilon_floor) = feature_scale(mean, std, config);
            if !epsilon_floor {
                critical = Some(name);
            }
        }

        diagnostics.insert(
            name.to_string(),
            FeatureContribution {
                candidate: value,
                reference: mean,
                deviation,
                weight,
                z_score: Some(z),
            },
        );
    }

    let rms = if total_weight > 0.0 { (weighted_sq / total_weight).sqrt() } else { 1.0 };
    let score = (100.0 * (1.0 - rms)).clamp(0.0, 100.0);
    let threshold = config.accept_threshold;

    let reason = match critical {
        Some(feature) => DecisionReason::CriticalDeviation { feature: feature.to_string() },
        None if score >= threshold => DecisionReason::Accepted,
        None => DecisionReason::BelowThreshold,
    };

    ComparisonResult {
        success: reason == DecisionReason::Accepted,
        score,
        method: ComparisonMethod::Enhanced,
        threshold,
        reason,
        diagnostics,
    }
}
