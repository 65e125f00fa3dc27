//! Baseline Module - Enrollment Baseline Builder
//!
//! Aggregates a user's K enrollment vectors into per-feature mean and
//! population standard deviation.
//!
//! # Architecture
//! - `types.rs`: `EnrollmentBaseline`, `EnrollmentVector`, `ConsistencyReport`
//! - `policy.rs`: `EnrollmentPolicy` (which samples are enrollment samples)
//! - `validate.rs`: Layout/completeness validation, `BaselineError`
//! - `consistency.rs`: Per-user consistency report
//!
//! # Failure Strategy
//! Fewer than K vectors -> `InsufficientEnrollment`. Never a partial baseline.

pub mod types;
pub mod policy;
pub mod validate;
pub mod consistency;

use crate::logic::config::EngineConfig;
use crate::logic::features::stats;
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

pub use consistency::analyze_consistency;
pub use policy::{EnrollmentPolicy, EnrollmentRecord};
pub use types::{ConsistencyReport, EnrollmentBaseline, EnrollmentVector};
pub use validate::{validate_baseline, BaselineError};

// ============================================================================
// BUILDER
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineBuilder {
    policy: EnrollmentPolicy,
}

impl From<&EngineConfig> for BaselineBuilder {
    fn from(config: &EngineConfig) -> Self {
        Self::new(EnrollmentPolicy::from(config))
    }
}

impl BaselineBuilder {
    pub fn new(policy: EnrollmentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }

    /// Build a baseline from the first K enrollment vectors
    pub fn build(&self, user_id: &str, enrollment: &[EnrollmentVector]) -> Result<EnrollmentBaseline, BaselineError> {
        let required = self.policy.required_samples;

        if enrollment.len() < required {
            log::debug!(
                "Baseline for '{}' not built: {}/{} enrollment samples",
                user_id, enrollment.len(), required
            );
            return Err(BaselineError::InsufficientEnrollment {
                required,
                available: enrollment.len(),
            });
        }

        if enrollment.len() > required {
            log::warn!(
                "Baseline for '{}': {} vectors passed, using the first {}",
                user_id, enrollment.len(), required
            );
        }

        let used = &enrollment[..required];
        for vector in used {
            if let Err(e) = vector.features.validate() {
                log::warn!("Rejected enrollment sample '{}': {}", vector.sample_id, e);
                return Err(e.into());
            }
        }

        let (mean, std) = aggregate(used);
        let built_from = used.iter().map(|v| v.sample_id.clone()).collect();
        let baseline = EnrollmentBaseline::new(user_id, mean, std, built_from);

        log::info!(
            "Built baseline {} for '{}' from {} samples (hash: {})",
            baseline.id, user_id, baseline.sample_count, &baseline.baseline_hash[..12]
        );

        Ok(baseline)
    }
}

/// Per-feature mean and population std
fn aggregate(vectors: &[EnrollmentVector]) -> (FeatureVector, FeatureVector) {
    let mut mean = FeatureVector::new();
    let mut std = FeatureVector::new();

    for index in 0..FEATURE_COUNT {
        let column: Vec<f64> = vectors.iter().map(|v| v.features.values[index]).collect();
        mean.set(index, stats::mean(&column).unwrap_or_default());
        std.set(index, stats::std_dev(&column).unwrap_or_default());
    }

    (mean, std)
}
