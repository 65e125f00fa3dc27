//! Enrollment Module - Sample Recording & Authentication Flow
//!
//! Wires normalizer, extractor, baseline builder and comparison engine
//! around a `SampleStore`.
//!
//! # Invariants
//! - A sample's enrollment flag is decided once, when it is recorded.
//!   Submissions for one user are serialized from count to insert to build,
//!   so concurrent submits never both claim the last enrollment slot.
//! - At most one baseline build in flight per user.
//! - A baseline is compared against only once all K vectors are recorded.
//! - Authentication attempts are never stored as samples.

pub mod store;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::logic::baseline::{
    analyze_consistency, BaselineBuilder, BaselineError, ConsistencyReport, EnrollmentBaseline,
    EnrollmentPolicy, EnrollmentVector,
};
use crate::logic::compare::{ComparisonEngine, ComparisonResult};
use crate::logic::config::{ConfigError, EngineConfig};
use crate::logic::features::{extract_payload, FeatureVector};
use crate::logic::stroke::DeviceCapabilities;

pub use store::{MemorySampleStore, SampleStore, StoreError, StoredSample};

#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("Baseline build already in progress for user '{0}'")]
    BuildInProgress(String),

    #[error(transparent)]
    Baseline(#[from] BaselineError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What happened to a submitted sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub sample_id: String,
    pub is_enrollment: bool,
    /// Enrollment samples recorded so far (including this one)
    pub enrolled: usize,
    pub required: usize,
    /// Baseline built by this submission, if it completed enrollment
    pub baseline: Option<EnrollmentBaseline>,
}

// ============================================================================
// USER LOCKS
// ============================================================================

/// One lock per user, created on first use
#[derive(Default)]
struct UserLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl UserLocks {
    fn get(&self, user_id: &str) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.lock().entry(user_id.to_string()).or_default())
    }
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct EnrollmentService<S: SampleStore> {
    store: S,
    policy: EnrollmentPolicy,
    builder: BaselineBuilder,
    engine: ComparisonEngine,
    user_locks: UserLocks,
}

impl<S: SampleStore> EnrollmentService<S> {
    pub fn new(store: S, config: EngineConfig) -> Result<Self, EnrollmentError> {
        config.validate()?;
        let policy = EnrollmentPolicy::from(&config);

        Ok(Self {
            store,
            policy,
            builder: BaselineBuilder::new(policy),
            engine: ComparisonEngine::new(config),
            user_locks: UserLocks::default(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }

    /// Normalize, extract and record one sample
    pub fn submit(
        &self,
        user_id: &str,
        raw: &Value,
        capabilities: Option<&DeviceCapabilities>,
    ) -> Result<SubmitOutcome, EnrollmentError> {
        let features = extract_payload(raw, capabilities);
        self.submit_vector(user_id, features)
    }

    /// Record an already extracted vector.
    /// Completing enrollment builds and saves the baseline.
    /// Blocks while another submission or build for the same user runs.
    pub fn submit_vector(&self, user_id: &str, features: FeatureVector) -> Result<SubmitOutcome, EnrollmentError> {
        let lock = self.user_locks.get(user_id);
        let _held = lock.lock();

        let enrolled_before = self.store.enrollment_count(user_id)?;
        let is_enrollment = self.policy.is_enrollment_slot(enrolled_before);

        log::debug!("Features for '{}': {}", user_id, features.to_log_entry());
        let sample = StoredSample::new(user_id, features, is_enrollment);
        let sample_id = sample.id.clone();
        self.store.insert_sample(sample)?;

        let enrolled = enrolled_before + usize::from(is_enrollment);
        log::info!(
            "Recorded sample {} for '{}' (enrollment: {}, {}/{})",
            sample_id, user_id, is_enrollment, enrolled, self.policy.required_samples
        );

        let baseline = if is_enrollment && self.policy.is_complete(enrolled) {
            Some(self.build_baseline(user_id)?)
        } else {
            None
        };

        Ok(SubmitOutcome {
            sample_id,
            is_enrollment,
            enrolled,
            required: self.policy.required_samples,
            baseline,
        })
    }

    /// Build and save the baseline from the user's enrollment samples.
    /// Fails with `BuildInProgress` instead of waiting when the user is busy.
    pub fn rebuild_baseline(&self, user_id: &str) -> Result<EnrollmentBaseline, EnrollmentError> {
        let lock = self.user_locks.get(user_id);
        let _held = lock.try_lock().ok_or_else(|| {
            log::warn!("Baseline build for '{}' rejected: already in progress", user_id);
            EnrollmentError::BuildInProgress(user_id.to_string())
        })?;

        self.build_baseline(user_id)
    }

    /// Caller holds the user's lock
    fn build_baseline(&self, user_id: &str) -> Result<EnrollmentBaseline, EnrollmentError> {
        let samples = self.store.samples_for(user_id)?;
        let enrollment: Vec<EnrollmentVector> = self
            .policy
            .select(&samples)
            .into_iter()
            .map(|s| EnrollmentVector::new(s.id.clone(), s.features.clone()))
            .collect();

        let baseline = self.builder.build(user_id, &enrollment)?;
        self.store.save_baseline(baseline.clone())?;
        Ok(baseline)
    }

    /// Compare a fresh sample against the user's reference data.
    /// The attempt itself is not recorded.
    pub fn authenticate(
        &self,
        user_id: &str,
        raw: &Value,
        capabilities: Option<&DeviceCapabilities>,
    ) -> ComparisonResult {
        let candidate = extract_payload(raw, capabilities);
        self.authenticate_vector(user_id, &candidate)
    }

    pub fn authenticate_vector(&self, user_id: &str, candidate: &FeatureVector) -> ComparisonResult {
        let baseline = self.store.baseline_for(user_id).unwrap_or_else(|e| {
            log::error!("Failed to load baseline for '{}': {}", user_id, e);
            None
        });
        let fallback = self.store.latest_sample(user_id).unwrap_or_else(|e| {
            log::error!("Failed to load latest sample for '{}': {}", user_id, e);
            None
        });

        let result = self.engine.compare(
            candidate,
            baseline.as_ref(),
            fallback.as_ref().map(|s| &s.features),
        );

        log::info!(
            target: "audit",
            "auth user={} success={} method={} score={:.1} threshold={:.1} reason={}",
            user_id,
            result.success,
            result.method.as_str(),
            result.score,
            result.threshold,
            result.reason
        );

        result
    }

    /// Consistency of the user's recorded samples (None below 2 samples)
    pub fn consistency(&self, user_id: &str) -> Result<Option<ConsistencyReport>, EnrollmentError> {
        let vectors: Vec<FeatureVector> = self
            .store
            .samples_for(user_id)?
            .into_iter()
            .map(|s| s.features)
            .collect();
        Ok(analyze_consistency(&vectors))
    }
}
