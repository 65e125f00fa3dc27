//! Stroke Authentication Core
//!
//! Turns raw pen/touch/mouse stroke captures into fixed-schema feature
//! vectors, builds per-user enrollment baselines and decides whether a new
//! sample matches.

pub mod constants;
pub mod logic;

pub use logic::baseline::{BaselineBuilder, BaselineError, EnrollmentBaseline, EnrollmentPolicy, EnrollmentVector};
pub use logic::compare::{ComparisonEngine, ComparisonMethod, ComparisonResult, DecisionReason};
pub use logic::config::{ConfigError, EngineConfig};
pub use logic::enrollment::{EnrollmentError, EnrollmentService, MemorySampleStore, SampleStore};
pub use logic::features::{extract, extract_payload, FeatureVector};
pub use logic::stroke::{normalize, normalize_str, DeviceCapabilities, Point, PointerType, Stroke};
