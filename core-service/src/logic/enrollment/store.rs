//! Sample Store
//!
//! Persistence seam for samples and baselines. `MemorySampleStore` keeps
//! everything in process; a database-backed store implements the same trait.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::baseline::{EnrollmentBaseline, EnrollmentRecord};
use crate::logic::features::FeatureVector;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Sample store error: {0}")]
pub struct StoreError(pub String);

/// One recorded sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSample {
    pub id: String,
    pub user_id: String,
    pub features: FeatureVector,
    /// Set once, when the sample is recorded
    pub is_enrollment: bool,
    pub recorded_at: DateTime<Utc>,
}

impl StoredSample {
    pub fn new(user_id: &str, features: FeatureVector, is_enrollment: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            features,
            is_enrollment,
            recorded_at: Utc::now(),
        }
    }
}

impl EnrollmentRecord for StoredSample {
    fn is_enrollment(&self) -> bool {
        self.is_enrollment
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

// ============================================================================
// STORE TRAIT
// ============================================================================

pub trait SampleStore: Send + Sync {
    fn insert_sample(&self, sample: StoredSample) -> Result<(), StoreError>;

    /// All samples of a user, in insertion order
    fn samples_for(&self, user_id: &str) -> Result<Vec<StoredSample>, StoreError>;

    fn save_baseline(&self, baseline: EnrollmentBaseline) -> Result<(), StoreError>;

    fn baseline_for(&self, user_id: &str) -> Result<Option<EnrollmentBaseline>, StoreError>;

    /// Most recently recorded sample (later insertion wins ties)
    fn latest_sample(&self, user_id: &str) -> Result<Option<StoredSample>, StoreError> {
        Ok(self
            .samples_for(user_id)?
            .into_iter()
            .max_by_key(|s| s.recorded_at))
    }

    fn enrollment_count(&self, user_id: &str) -> Result<usize, StoreError> {
        Ok(self
            .samples_for(user_id)?
            .iter()
            .filter(|s| s.is_enrollment)
            .count())
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct MemorySampleStore {
    samples: RwLock<HashMap<String, Vec<StoredSample>>>,
    baselines: RwLock<HashMap<String, EnrollmentBaseline>>,
}

impl MemorySampleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SampleStore for MemorySampleStore {
    fn insert_sample(&self, sample: StoredSample) -> Result<(), StoreError> {
        self.samples
            .write()
            .entry(sample.user_id.clone())
            .or_default()
            .push(sample);
        Ok(())
    }

    fn samples_for(&self, user_id: &str) -> Result<Vec<StoredSample>, StoreError> {
        Ok(self.samples.read().get(user_id).cloned().unwrap_or_default())
    }

    fn save_baseline(&self, baseline: EnrollmentBaseline) -> Result<(), StoreError> {
        self.baselines.write().insert(baseline.user_id.clone(), baseline);
        Ok(())
    }

    fn baseline_for(&self, user_id: &str) -> Result<Option<EnrollmentBaseline>, StoreError> {
        Ok(self.baselines.read().get(user_id).cloned())
    }
}
