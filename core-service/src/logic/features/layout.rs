//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! ## Why versioning matters:
//! - Stored enrollment baselines are index-aligned with this layout
//! - Stored sample vectors are replayed as fallback references

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
/// This is the SINGLE SOURCE OF TRUTH for feature layout
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Basic stats (0-3) ===
    "stroke_count",          // 0: Number of strokes
    "total_points",          // 1: Points across all strokes
    "total_duration_ms",     // 2: First to last timestamp of the sample
    "avg_points_per_stroke", // 3: total_points / stroke_count

    // === Velocity (4-7) ===
    "avg_velocity",          // 4: Mean segment speed (px/ms)
    "max_velocity",          // 5
    "min_velocity",          // 6
    "velocity_std",          // 7

    // === Shape / bounding box (8-13) ===
    "width",                 // 8
    "height",                // 9
    "area",                  // 10: width * height
    "aspect_ratio",          // 11: width / height (0 when height == 0)
    "center_x",              // 12
    "center_y",              // 13

    // === Stroke geometry (14-18) ===
    "avg_stroke_length",     // 14: Mean path length per stroke
    "total_length",          // 15
    "length_variation",      // 16: Std of path lengths
    "avg_stroke_duration",   // 17
    "duration_variation",    // 18

    // === Drawing geometry, first stroke (19-24) ===
    "curve_smoothness",      // 19: Mean |turning angle|
    "radial_deviation",      // 20: CV of radius around centroid
    "corner_sharpness",      // 21: Share of turning at corner peaks
    "corner_count",          // 22
    "line_consistency",      // 23: Minor/major spread around best-fit line
    "closure_ratio",         // 24: Start-end gap / path length

    // === Pressure, capability dependent (25-26) ===
    "avg_pressure",          // 25
    "pressure_std",          // 26
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 27;

/// Value used for every feature when input data is insufficient
pub const FEATURE_DEFAULT: f64 = 0.0;

// ============================================================================
// FEATURE GROUPS
// ============================================================================

/// Conceptual feature group (drives comparison weights)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureGroup {
    Basic,
    Velocity,
    Shape,
    Stroke,
    Geometry,
    Pressure,
}

/// Group of the feature at `index` (ranges follow FEATURE_LAYOUT)
pub fn feature_group(index: usize) -> Option<FeatureGroup> {
    match index {
        0..=3 => Some(FeatureGroup::Basic),
        4..=7 => Some(FeatureGroup::Velocity),
        8..=13 => Some(FeatureGroup::Shape),
        14..=18 => Some(FeatureGroup::Stroke),
        19..=24 => Some(FeatureGroup::Geometry),
        25..=26 => Some(FeatureGroup::Pressure),
        _ => None,
    }
}

/// Features that count discrete things rather than measure continuous ones
pub const COUNT_FEATURES: &[&str] = &["stroke_count", "total_points", "corner_count"];

pub fn is_count_feature(name: &str) -> bool {
    COUNT_FEATURES.contains(&name)
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FEATURE_VERSION]);

    // Hash all feature names in order
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

static LAYOUT_HASH: Lazy<u32> = Lazy::new(compute_layout_hash);

/// Get layout hash (computed once)
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 27);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_names_unique() {
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            assert_eq!(feature_index(name), Some(i), "duplicate feature name {}", name);
        }
    }

    #[test]
    fn test_every_feature_has_group() {
        for i in 0..FEATURE_COUNT {
            assert!(feature_group(i).is_some(), "feature {} has no group", i);
        }
        assert_eq!(feature_group(FEATURE_COUNT), None);
        assert_eq!(feature_group(4), Some(FeatureGroup::Velocity));
        assert_eq!(feature_group(8), Some(FeatureGroup::Shape));
    }

    #[test]
    fn test_count_features_exist() {
        for name in COUNT_FEATURES {
            assert!(feature_index(name).is_some());
        }
        assert!(is_count_feature("stroke_count"));
        assert!(!is_count_feature("width"));
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout_success() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
    }

    #[test]
    fn test_validate_layout_version_mismatch() {
        let err = validate_layout(FEATURE_VERSION + 1, layout_hash()).unwrap_err();
        assert_eq!(err.actual_version, FEATURE_VERSION + 1);
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn test_validate_layout_hash_mismatch() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).is_err());
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("stroke_count"), Some(0));
        assert_eq!(feature_index("avg_velocity"), Some(4));
        assert_eq!(feature_index("pressure_std"), Some(26));
        assert_eq!(feature_index("nope"), None);
    }
}
