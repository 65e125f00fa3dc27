//! Compare Module - Authentication Decision Engine
//!
//! Start -> {baseline available -> enhanced, otherwise -> fallback} -> decision.
//! No retries. Pure and stateless: one engine can serve any number of threads.
//!
//! # Architecture
//! - `types.rs`: `ComparisonResult`, `DecisionReason`, `FeatureContribution`
//! - `weights.rs`: Group weights, primary groups
//! - `enhanced.rs`: Capped z-scores against an `EnrollmentBaseline`
//! - `fallback.rs`: Relative distance against one reference vector

pub mod types;
pub mod weights;
pub mod enhanced;
pub mod fallback;

use crate::logic::baseline::{validate_baseline, EnrollmentBaseline};
use crate::logic::config::EngineConfig;
use crate::logic::features::FeatureVector;

pub use enhanced::compare_enhanced;
pub use fallback::compare_fallback;
pub use types::{ComparisonMethod, ComparisonResult, DecisionReason, FeatureContribution};

#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    config: EngineConfig,
}

impl ComparisonEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decide whether `candidate` matches the user's reference data.
    ///
    /// A baseline is used only when it is valid and complete; otherwise the
    /// single fallback vector is tried. Neither -> rejected, `no_reference`.
    pub fn compare(
        &self,
        candidate: &FeatureVector,
        baseline: Option<&EnrollmentBaseline>,
        fallback: Option<&FeatureVector>,
    ) -> ComparisonResult {
        if let Err(e) = candidate.validate() {
            log::warn!("Candidate rejected: {}", e);
            return ComparisonResult::rejected(
                DecisionReason::IncompatibleCandidate,
                self.config.fallback_accept_threshold,
            );
        }

        let baseline = baseline.filter(|b| match validate_baseline(b, self.config.enrollment_samples) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Baseline {} unusable, falling back: {}", b.id, e);
                false
            }
        });

        let result = if let Some(baseline) = baseline {
            compare_enhanced(candidate, baseline, &self.config)
        } else {
            let reference = fallback.filter(|r| match r.validate() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Fallback reference unusable: {}", e);
                    false
                }
            });

            match reference {
                Some(reference) => compare_fallback(candidate, reference, &self.config),
                None => {
                    log::info!("No reference data, rejecting");
                    return ComparisonResult::rejected(
                        DecisionReason::NoReference,
                        self.config.fallback_accept_threshold,
                    );
                }
            }
        };

        log::info!(
            "Decision: {} (method: {}, score: {:.1}/{:.1}, reason: {})",
            if result.success { "ACCEPT" } else { "REJECT" },
            result.method.as_str(),
            result.score,
            result.threshold,
            result.reason
        );
        if let Some((name, worst)) = result.worst_feature() {
            log::debug!("Largest deviation: {} ({:.3})", name, worst.deviation);
        }

        result
    }
}
