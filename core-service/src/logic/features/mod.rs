//! Features Module - Feature Extraction Engine
//!
//! Turns normalized strokes into a fixed-schema `FeatureVector`.
//! Each analysis is a pure function registered by name in `registry.rs`;
//! adding a feature means a layout entry plus a registry entry.

pub mod layout;
pub mod vector;
pub mod guard;
pub mod stats;
pub mod basic;
pub mod velocity;
pub mod shape;
pub mod length;
pub mod geometry;
pub mod pressure;
pub mod registry;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{FeatureGroup, FEATURE_COUNT, FEATURE_DEFAULT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::{FeatureVector, FeatureVectorBuilder};
pub use guard::{with_valid, with_valid_points, AnalysisInput};
pub use registry::{extract, extract_payload, FeatureDef, REGISTRY};
