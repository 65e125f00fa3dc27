use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which path produced the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMethod {
    /// Statistical comparison against a complete baseline
    Enhanced,
    /// Relative distance against a single reference vector
    Fallback,
}

impl ComparisonMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enhanced => "enhanced",
            Self::Fallback => "fallback",
        }
    }
}

/// Why the decision came out the way it did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionReason {
    Accepted,
    BelowThreshold,
    /// A velocity/shape feature hit the z-score cap
    CriticalDeviation { feature: String },
    NoReference,
    IncompatibleCandidate,
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::BelowThreshold => write!(f, "below_threshold"),
            Self::CriticalDeviation { feature } => write!(f, "critical_deviation({})", feature),
            Self::NoReference => write!(f, "no_reference"),
            Self::IncompatibleCandidate => write!(f, "incompatible_candidate"),
        }
    }
}

/// Per-feature diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub candidate: f64,
    /// Baseline mean (enhanced) or reference value (fallback)
    pub reference: f64,
    /// Normalized deviation (0 = identical, 1 = saturated)
    pub deviation: f64,
    pub weight: f64,
    /// Capped z-score, enhanced path only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
}

/// Authentication decision. Never persisted as identity state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub success: bool,
    /// Similarity 0 - 100
    pub score: f64,
    pub method: ComparisonMethod,
    /// Acceptance threshold that was applied
    pub threshold: f64,
    pub reason: DecisionReason,
    pub diagnostics: BTreeMap<String, FeatureContribution>,
}

impl ComparisonResult {
    /// Terminal rejection without any feature comparison
    pub fn rejected(reason: DecisionReason, threshold: f64) -> Self {
        Self {
            success: false,
            score: 0.0,
            method: ComparisonMethod::Fallback,
            threshold,
            reason,
            diagnostics: BTreeMap::new(),
        }
    }

    /// Feature with the largest deviation, if any were compared
    pub fn worst_feature(&self) -> Option<(&str, &FeatureContribution)> {
        self.diagnostics
            .iter()
            .max_by(|a, b| a.1.deviation.total_cmp(&b.1.deviation))
            .map(|(name, c)| (name.as_str(), c))
    }
}
