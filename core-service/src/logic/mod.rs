//! Logic Module - Stroke Authentication Engines
//!
//! ## Architecture
//! - `stroke/` - Payload normalization (raw JSON -> strokes)
//! - `features/` - Feature extraction (strokes -> versioned FeatureVector)
//! - `baseline/` - Enrollment policy & baseline builder
//! - `compare/` - Enhanced / fallback comparison engine
//! - `enrollment/` - Sample store & enrollment/authentication flow

pub mod config;
pub mod stroke;
pub mod features;
pub mod baseline;
pub mod compare;
pub mod enrollment;
