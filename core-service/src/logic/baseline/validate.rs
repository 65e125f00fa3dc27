use thiserror::Error;

use super::types::EnrollmentBaseline;
use crate::logic::features::layout::{validate_layout, LayoutMismatchError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BaselineError {
    /// Fewer than K enrollment vectors: no baseline is produced
    #[error("Insufficient enrollment: {available} of {required} samples recorded")]
    InsufficientEnrollment { required: usize, available: usize },

    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    /// Stored baseline aggregated fewer samples than the policy requires
    #[error("Baseline incomplete: built from {available} of {required} samples")]
    Incomplete { required: usize, available: usize },

    #[error("Baseline corrupted: {0}")]
    Corrupted(String),
}

/// Validate a stored baseline before comparing against it
pub fn validate_baseline(baseline: &EnrollmentBaseline, required_samples: usize) -> Result<(), BaselineError> {
    validate_layout(baseline.feature_version, baseline.layout_hash)?;
    baseline.mean.validate()?;
    baseline.std.validate()?;

    if baseline.sample_count < required_samples {
        return Err(BaselineError::Incomplete {
            required: required_samples,
            available: baseline.sample_count,
        });
    }

    if baseline.built_from.len() != baseline.sample_count {
        return Err(BaselineError::Corrupted(format!(
            "sample_count {} but built_from lists {} ids",
            baseline.sample_count,
            baseline.built_from.len()
        )));
    }

    if !baseline.mean.is_finite() || baseline.std.as_slice().iter().any(|s| !s.is_finite() || *s < 0.0) {
        return Err(BaselineError::Corrupted("non-finite or negative statistics".to_string()));
    }

    if baseline.compute_hash() != baseline.baseline_hash {
        return Err(BaselineError::Corrupted("fingerprint mismatch".to_string()));
    }

    Ok(())
}
