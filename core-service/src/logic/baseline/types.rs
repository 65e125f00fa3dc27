use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::layout::{layout_hash, FEATURE_VERSION};
use crate::logic::features::FeatureVector;

// ============================================================================
// ENROLLMENT INPUT
// ============================================================================

/// Feature vector of one enrollment sample, tagged with its sample id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentVector {
    pub sample_id: String,
    pub features: FeatureVector,
}

impl EnrollmentVector {
    pub fn new(sample_id: impl Into<String>, features: FeatureVector) -> Self {
        Self {
            sample_id: sample_id.into(),
            features,
        }
    }
}

// ============================================================================
// ENROLLMENT BASELINE
// ============================================================================

/// Per-user mean/std baseline. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentBaseline {
    pub id: String,
    pub user_id: String,

    pub feature_version: u8,
    pub layout_hash: u32,

    /// Per-feature mean (layout order)
    pub mean: FeatureVector,
    /// Per-feature population standard deviation (layout order)
    pub std: FeatureVector,

    pub sample_count: usize,
    /// Sample ids in the order they were aggregated
    pub built_from: Vec<String>,

    pub built_at: i64, // Unix timestamp
    /// SHA-256 over mean/std/built_from (hex)
    pub baseline_hash: String,
}

impl EnrollmentBaseline {
    pub(crate) fn new(
        user_id: &str,
        mean: FeatureVector,
        std: FeatureVector,
        built_from: Vec<String>,
    ) -> Self {
        let baseline_hash = fingerprint(&mean, &std, &built_from);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            mean,
            std,
            sample_count: built_from.len(),
            built_from,
            built_at: chrono::Utc::now().timestamp(),
            baseline_hash,
        }
    }

    /// Recompute the fingerprint from the stored statistics
    pub fn compute_hash(&self) -> String {
        fingerprint(&self.mean, &self.std, &self.built_from)
    }
}

/// Deterministic digest of the statistics a baseline was built with
pub fn fingerprint(mean: &FeatureVector, std: &FeatureVector, built_from: &[String]) -> String {
    let mut hasher = Sha256::new();

    hasher.update([mean.version]);
    hasher.update(mean.layout_hash.to_le_bytes());
    for value in mean.as_slice().iter().chain(std.as_slice()) {
        hasher.update(value.to_bits().to_le_bytes());
    }
    for id in built_from {
        hasher.update(id.as_bytes());
        hasher.update([0]); // Separator
    }

    hex::encode(hasher.finalize())
}

// ============================================================================
// CONSISTENCY REPORT
// ============================================================================

/// How stable a user's genuine samples are (1 = identical, lower = noisier)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub velocity_consistency: f64,
    pub stroke_count_consistency: f64,
    pub area_consistency: f64,
    pub sample_count: usize,
}
