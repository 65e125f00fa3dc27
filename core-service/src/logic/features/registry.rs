//! Feature Registry & Extractor
//!
//! `REGISTRY` maps every feature name to a pure analysis function, in
//! FEATURE_LAYOUT order. `extract()` runs the whole table; it is total
//! and deterministic, so the same strokes always give the same vector.

use serde_json::Value;

use super::guard::AnalysisInput;
use super::layout::FEATURE_COUNT;
use super::vector::FeatureVector;
use super::{basic, geometry, length, pressure, shape, velocity};
use crate::logic::stroke::{self, DeviceCapabilities, Stroke};

/// Pure analysis: normalized input -> one scalar
pub type AnalysisFn = fn(&AnalysisInput<'_>) -> f64;

/// One registry entry
#[derive(Clone, Copy)]
pub struct FeatureDef {
    pub name: &'static str,
    pub compute: AnalysisFn,
}

const fn def(name: &'static str, compute: AnalysisFn) -> FeatureDef {
    FeatureDef { name, compute }
}

// ============================================================================
// REGISTRY
// ============================================================================

pub static REGISTRY: [FeatureDef; FEATURE_COUNT] = [
    // Basic
    def("stroke_count", basic::stroke_count),
    def("total_points", basic::total_points),
    def("total_duration_ms", basic::total_duration_ms),
    def("avg_points_per_stroke", basic::avg_points_per_stroke),
    // Velocity
    def("avg_velocity", velocity::avg_velocity),
    def("max_velocity", velocity::max_velocity),
    def("min_velocity", velocity::min_velocity),
    def("velocity_std", velocity::velocity_std),
    // Shape
    def("width", shape::width),
    def("height", shape::height),
    def("area", shape::area),
    def("aspect_ratio", shape::aspect_ratio),
    def("center_x", shape::center_x),
    def("center_y", shape::center_y),
    // Stroke geometry
    def("avg_stroke_length", length::avg_stroke_length),
    def("total_length", length::total_length),
    def("length_variation", length::length_variation),
    def("avg_stroke_duration", length::avg_stroke_duration),
    def("duration_variation", length::duration_variation),
    // Drawing geometry
    def("curve_smoothness", geometry::curve_smoothness),
    def("radial_deviation", geometry::radial_deviation),
    def("corner_sharpness", geometry::corner_sharpness),
    def("corner_count", geometry::corner_count),
    def("line_consistency", geometry::line_consistency),
    def("closure_ratio", geometry::closure_ratio),
    // Pressure
    def("avg_pressure", pressure::avg_pressure),
    def("pressure_std", pressure::pressure_std),
];

// ============================================================================
// EXTRACTION
// ============================================================================

/// Extract the full feature vector.
///
/// `None` strokes (no geometry) yield the all-default vector. Without a
/// capabilities descriptor, pressure support is inferred from the points.
pub fn extract(strokes: Option<&[Stroke]>, capabilities: Option<&DeviceCapabilities>) -> FeatureVector {
    let strokes = strokes.unwrap_or(&[]);
    let capabilities = capabilities
        .copied()
        .unwrap_or_else(|| DeviceCapabilities::infer(strokes));
    let input = AnalysisInput::new(strokes, capabilities);

    let mut vector = FeatureVector::new();
    for (index, def) in REGISTRY.iter().enumerate() {
        vector.set(index, (def.compute)(&input));
    }
    vector
}

/// Normalize a raw payload and extract its features in one step
pub fn extract_payload(raw: &Value, capabilities: Option<&DeviceCapabilities>) -> FeatureVector {
    let strokes = stroke::normalize(raw);
    if strokes.is_none() {
        log::debug!("No stroke geometry, using default feature vector");
    }
    extract(strokes.as_deref(), capabilities)
}
