//! Feature Vector - Fixed-schema summary of one drawing sample
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks
//!
//! Every slot is always present and finite: writes of NaN/Infinity are
//! replaced by `FEATURE_DEFAULT`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::{
    feature_index, layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT,
    FEATURE_DEFAULT, FEATURE_LAYOUT, FEATURE_VERSION,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// All-default vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [FEATURE_DEFAULT; FEATURE_COUNT],
        }
    }

    /// Create from raw values; non-finite values are replaced by the default
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        let mut vector = Self::new();
        for (i, v) in values.into_iter().enumerate() {
            vector.set(i, v);
        }
        vector
    }

    /// Build from a name -> value map (persistence format).
    /// Unknown names are ignored, missing names keep the default.
    pub fn from_map<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut vector = Self::new();
        for (name, value) in entries {
            if !vector.set_by_name(name, value) {
                log::debug!("Ignoring unknown feature '{}'", name);
            }
        }
        vector
    }

    /// Named values in layout order
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index
    pub fn set(&mut self, index: usize, value: f64) {
        if index < FEATURE_COUNT {
            self.values[index] = if value.is_finite() { value } else { FEATURE_DEFAULT };
        }
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        if let Some(index) = feature_index(name) {
            self.set(index, value);
            true
        } else {
            false
        }
    }

    /// True when every value is finite
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// Check if this vector is compatible with current layout
    pub fn is_compatible(&self) -> bool {
        self.validate().is_ok()
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "named_values": self.to_map(),
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self { vector: FeatureVector::new() }
    }

    pub fn avg_velocity(mut self, value: f64) -> Self {
        self.vector.set_by_name("avg_velocity", value);
        self
    }

    pub fn width(mut self, value: f64) -> Self {
        self.vector.set_by_name("width", value);
        self
    }

    pub fn height(mut self, value: f64) -> Self {
        self.vector.set_by_name("height", value);
        self
    }

    pub fn stroke_count(mut self, value: f64) -> Self {
        self.vector.set_by_name("stroke_count", value);
        self
    }

    /// Set feature by name dynamically
    pub fn set(mut self, name: &str, value: f64) -> Self {
        self.vector.set_by_name(name, value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert!(vector.as_slice().iter().all(|&v| v == FEATURE_DEFAULT));
    }

    #[test]
    fn test_feature_vector_builder() {
        let vector = FeatureVectorBuilder::new()
            .avg_velocity(0.5)
            .width(100.0)
            .build();

        assert_eq!(vector.get_by_name("avg_velocity"), Some(0.5));
        assert_eq!(vector.get_by_name("width"), Some(100.0));
    }

    #[test]
    fn test_set_by_name_unknown() {
        let mut vector = FeatureVector::new();
        assert!(vector.set_by_name("height", 42.0));
        assert!(!vector.set_by_name("nonexistent", 0.0));
    }

    #[test]
    fn test_non_finite_replaced() {
        let mut vector = FeatureVector::new();
        vector.set_by_name("width", f64::NAN);
        vector.set_by_name("height", f64::INFINITY);
        assert_eq!(vector.get_by_name("width"), Some(FEATURE_DEFAULT));
        assert_eq!(vector.get_by_name("height"), Some(FEATURE_DEFAULT));
        assert!(vector.is_finite());

        let mut values = [1.0; FEATURE_COUNT];
        values[3] = f64::NEG_INFINITY;
        assert!(FeatureVector::from_values(values).is_finite());
    }

    #[test]
    fn test_map_conversion() {
        let vector = FeatureVectorBuilder::new().width(12.5).build();
        let map = vector.to_map();
        assert_eq!(map.len(), FEATURE_COUNT);
        assert_eq!(map["width"], 12.5);

        let back = FeatureVector::from_map(map.iter().map(|(k, v)| (k.as_str(), *v)));
        assert_eq!(back, vector);
    }

    #[test]
    fn test_from_map_missing_and_unknown() {
        let vector = FeatureVector::from_map([("width", 3.0), ("bogus", 9.0)]);
        assert_eq!(vector.get_by_name("width"), Some(3.0));
        assert_eq!(vector.get_by_name("height"), Some(FEATURE_DEFAULT));
    }

    #[test]
    fn test_feature_vector_validation() {
        let mut vector = FeatureVector::new();
        assert!(vector.is_compatible());
        vector.layout_hash ^= 1;
        assert!(!vector.is_compatible());
    }

    #[test]
    fn test_to_log_entry() {
        let log = FeatureVectorBuilder::new().avg_velocity(1.5).build().to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert_eq!(log["named_values"]["avg_velocity"], 1.5);
    }
}
