//! Engine Configuration
//!
//! Thresholds and enrollment size for the comparison core.
//! Defaults live in `constants.rs`; `from_env()` overrides them.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Out-of-range configuration value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("enrollment_samples must be at least 1 (got {0})")]
    EnrollmentSamples(usize),

    #[error("{name} must be within 0..=100 (got {value})")]
    Threshold { name: &'static str, value: f64 },

    #[error("{name} must be finite and > 0 (got {value})")]
    NonPositive { name: &'static str, value: f64 },
}

/// Comparison & enrollment configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Enrollment samples (K) required to build a baseline
    pub enrollment_samples: usize,

    /// Enhanced-path acceptance threshold (0 - 100)
    pub accept_threshold: f64,

    /// Fallback-path acceptance threshold (0 - 100)
    pub fallback_accept_threshold: f64,

    /// Upper bound for per-feature z-scores
    pub z_cap: f64,

    /// Std floor as a fraction of |mean|
    pub min_std_ratio: f64,

    /// Absolute std floor
    pub std_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enrollment_samples: DEFAULT_ENROLLMENT_SAMPLES,
            accept_threshold: DEFAULT_ACCEPT_THRESHOLD,
            fallback_accept_threshold: DEFAULT_FALLBACK_ACCEPT_THRESHOLD,
            z_cap: DEFAULT_Z_CAP,
            min_std_ratio: DEFAULT_MIN_STD_RATIO,
            std_epsilon: DEFAULT_STD_EPSILON,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    /// Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enrollment_samples: env_or(ENV_ENROLLMENT_SAMPLES, defaults.enrollment_samples),
            accept_threshold: env_or(ENV_ACCEPT_THRESHOLD, defaults.accept_threshold),
            fallback_accept_threshold: env_or(
                ENV_FALLBACK_ACCEPT_THRESHOLD,
                defaults.fallback_accept_threshold,
            ),
            z_cap: env_or(ENV_Z_CAP, defaults.z_cap),
            min_std_ratio: env_or(ENV_MIN_STD_RATIO, defaults.min_std_ratio),
            std_epsilon: env_or(ENV_STD_EPSILON, defaults.std_epsilon),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enrollment_samples == 0 {
            return Err(ConfigError::EnrollmentSamples(self.enrollment_samples));
        }

        for (name, value) in [
            ("accept_threshold", self.accept_threshold),
            ("fallback_accept_threshold", self.fallback_accept_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Threshold { name, value });
            }
        }

        for (name, value) in [
            ("z_cap", self.z_cap),
            ("std_epsilon", self.std_epsilon),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if !self.min_std_ratio.is_finite() || self.min_std_ratio < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "min_std_ratio",
                value: self.min_std_ratio,
            });
        }

        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("Invalid value for {}: '{}', using default {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.enrollment_samples, 3);
    }

    #[test]
    fn test_reject_zero_enrollment() {
        let config = EngineConfig { enrollment_samples: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::EnrollmentSamples(0)));
    }

    #[test]
    fn test_reject_threshold_out_of_range() {
        let config = EngineConfig { accept_threshold: 120.0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Threshold { name: "accept_threshold", .. })
        ));
    }

    #[test]
    fn test_reject_non_positive_cap() {
        let config = EngineConfig { z_cap: 0.0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = EngineConfig { std_epsilon: f64::NAN, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_or_falls_back() {
        // Key that is never set by the test environment
        let value: usize = env_or("STROKE_AUTH_TEST_UNSET_KEY", 7);
        assert_eq!(value, 7);
    }
}
