//! Central Configuration Constants
//!
//! Single source of truth for all engine defaults.
//! `EngineConfig` starts from these values; environment variables override them.

/// Number of enrollment samples required before a baseline is built
pub const DEFAULT_ENROLLMENT_SAMPLES: usize = 3;

/// Minimum score (0-100) for an enhanced comparison to succeed
pub const DEFAULT_ACCEPT_THRESHOLD: f64 = 70.0;

/// Minimum score (0-100) for a fallback comparison to succeed.
/// Stricter than the enhanced threshold: single-reference evidence is weaker.
pub const DEFAULT_FALLBACK_ACCEPT_THRESHOLD: f64 = 80.0;

/// z-scores are capped here; a primary feature at the cap is a critical deviation
pub const DEFAULT_Z_CAP: f64 = 8.0;

/// Std floor relative to the baseline mean (5% of |mean|)
pub const DEFAULT_MIN_STD_RATIO: f64 = 0.05;

/// Absolute std floor, used when std and mean are both zero
pub const DEFAULT_STD_EPSILON: f64 = 1e-3;

/// Count features in the fallback path tolerate this absolute difference
pub const FALLBACK_COUNT_TOLERANCE: f64 = 5.0;

/// Timestamp step (ms) assigned to points captured without a time value
pub const ESTIMATED_POINT_INTERVAL_MS: i64 = 10;

/// Turning angle (radians) above which a local peak counts as a corner (45°)
pub const CORNER_ANGLE_THRESHOLD: f64 = std::f64::consts::FRAC_PI_4;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Stroke-Auth";

// ============================================
// Environment variable names
// ============================================

pub const ENV_ENROLLMENT_SAMPLES: &str = "STROKE_AUTH_ENROLLMENT_SAMPLES";
pub const ENV_ACCEPT_THRESHOLD: &str = "STROKE_AUTH_ACCEPT_THRESHOLD";
pub const ENV_FALLBACK_ACCEPT_THRESHOLD: &str = "STROKE_AUTH_FALLBACK_ACCEPT_THRESHOLD";
pub const ENV_Z_CAP: &str = "STROKE_AUTH_Z_CAP";
pub const ENV_MIN_STD_RATIO: &str = "STROKE_AUTH_MIN_STD_RATIO";
pub const ENV_STD_EPSILON: &str = "STROKE_AUTH_STD_EPSILON";
