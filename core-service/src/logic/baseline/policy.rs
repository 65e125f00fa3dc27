//! Enrollment Policy
//!
//! Which samples feed the baseline is an explicit rule: each sample carries
//! an enrollment flag set when it was recorded, and the first K flagged
//! samples (chronologically) are aggregated. Row order is never used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ENROLLMENT_SAMPLES;
use crate::logic::config::EngineConfig;

/// Stored sample as seen by the policy
pub trait EnrollmentRecord {
    fn is_enrollment(&self) -> bool;
    fn recorded_at(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentPolicy {
    /// K: enrollment samples aggregated into a baseline
    pub required_samples: usize,
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self { required_samples: DEFAULT_ENROLLMENT_SAMPLES }
    }
}

impl From<&EngineConfig> for EnrollmentPolicy {
    fn from(config: &EngineConfig) -> Self {
        Self { required_samples: config.enrollment_samples }
    }
}

impl EnrollmentPolicy {
    pub fn new(required_samples: usize) -> Self {
        Self { required_samples }
    }

    /// Flag for a newly recorded sample, given how many enrollment samples exist
    pub fn is_enrollment_slot(&self, enrolled_so_far: usize) -> bool {
        enrolled_so_far < self.required_samples
    }

    /// True once K enrollment samples are recorded
    pub fn is_complete(&self, enrolled: usize) -> bool {
        enrolled >= self.required_samples
    }

    /// Enrollment-flagged samples, oldest first, at most K.
    /// Ties on `recorded_at` keep their input order.
    pub fn select<'a, T: EnrollmentRecord>(&self, samples: &'a [T]) -> Vec<&'a T> {
        let mut flagged: Vec<&T> = samples.iter().filter(|s| s.is_enrollment()).collect();
        flagged.sort_by_key(|s| s.recorded_at());
        flagged.truncate(self.required_samples);
        flagged
    }
}
