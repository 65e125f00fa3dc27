//! Integration Tests for Feature Extraction
//!
//! Exercises normalizer + registry together on realistic and hostile input.

use serde_json::json;

use crate::logic::features::{
    extract, extract_payload, FeatureVector, FEATURE_COUNT, FEATURE_DEFAULT, FEATURE_LAYOUT,
};
use crate::logic::stroke::{normalize, DeviceCapabilities, Point, PointerType, Stroke};

fn signature() -> Vec<Stroke> {
    vec![
        Stroke::new(vec![
            Point::new(100.0, 100.0, 0),
            Point::new(150.0, 120.0, 50),
            Point::new(200.0, 130.0, 100),
            Point::new(210.0, 180.0, 140),
        ]),
        Stroke::new(vec![
            Point::new(120.0, 160.0, 300),
            Point::new(180.0, 150.0, 360),
        ]),
    ]
}

fn assert_total(vector: &FeatureVector) {
    assert_eq!(vector.to_map().len(), FEATURE_COUNT);
    for (name, value) in FEATURE_LAYOUT.iter().zip(vector.as_slice()) {
        assert!(value.is_finite(), "{} is not finite: {}", name, value);
    }
}

/// Extraction never panics and never leaves a non-finite value
#[test]
fn test_extraction_is_total() {
    let inputs: Vec<Option<Vec<Stroke>>> = vec![
        None,
        Some(vec![]),
        Some(vec![Stroke::default()]),
        Some(vec![Stroke::new(vec![Point::new(5.0, 5.0, 0)])]),
        Some(vec![Stroke::new(vec![Point::new(5.0, 5.0, 0); 10])]),
        Some(vec![Stroke::new(vec![Point::new(1e308, -1e308, 0), Point::new(-1e308, 1e308, 0)])]),
        Some(vec![Stroke::new(vec![Point::new(0.0, 0.0, i64::MAX), Point::new(1.0, 1.0, i64::MIN)])]),
        Some(signature()),
    ];

    for strokes in &inputs {
        let vector = extract(strokes.as_deref(), None);
        assert_total(&vector);
        assert!(vector.is_compatible());
    }
}

/// Same strokes, same bits
#[test]
fn test_extraction_is_idempotent() {
    let strokes = signature();
    let a = extract(Some(&strokes), None);
    let b = extract(Some(&strokes), None);

    let bits = |v: &FeatureVector| v.as_slice().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn test_curve_smoothness_zero_below_three_points() {
    for n in 0..3 {
        let points: Vec<Point> = (0..n).map(|i| Point::new(i as f64 * 7.0, (i * i) as f64, i)).collect();
        let strokes = vec![Stroke::new(points), Stroke::new(signature()[0].points.clone())];
        let vector = extract(Some(&strokes), None);
        assert_eq!(vector.get_by_name("curve_smoothness"), Some(0.0));
    }
}

#[test]
fn test_identical_points_have_zero_radial_deviation() {
    let strokes = vec![Stroke::new(vec![Point::new(42.5, -3.25, 0); 8])];
    let vector = extract(Some(&strokes), None);
    assert_eq!(vector.get_by_name("radial_deviation"), Some(0.0));
    assert_eq!(vector.get_by_name("aspect_ratio"), Some(0.0));
    assert_eq!(vector.get_by_name("avg_velocity"), Some(0.0));
    assert_total(&vector);
}

#[test]
fn test_well_formed_signature() {
    let vector = extract(Some(&signature()), None);

    assert_eq!(vector.get_by_name("stroke_count"), Some(2.0));
    assert_eq!(vector.get_by_name("total_points"), Some(6.0));
    assert_eq!(vector.get_by_name("total_duration_ms"), Some(360.0));
    assert_eq!(vector.get_by_name("width"), Some(110.0));
    assert_eq!(vector.get_by_name("height"), Some(80.0));
    assert!(vector.get_by_name("avg_velocity").unwrap() > 0.0);
    assert!(vector.get_by_name("curve_smoothness").unwrap() > 0.0);
    // No pressure in the data, no descriptor: pressure stays default
    assert_eq!(vector.get_by_name("avg_pressure"), Some(FEATURE_DEFAULT));
}

#[test]
fn test_capabilities_gate_pressure() {
    let strokes = vec![Stroke::new(vec![
        Point::new(0.0, 0.0, 0).with_pressure(0.5),
        Point::new(10.0, 0.0, 10).with_pressure(0.7),
    ])];

    let inferred = extract(Some(&strokes), None);
    assert!((inferred.get_by_name("avg_pressure").unwrap() - 0.6).abs() < 1e-12);

    let mouse = DeviceCapabilities { supports_pressure: false, pointer_type: PointerType::Mouse };
    let gated = extract(Some(&strokes), Some(&mouse));
    assert_eq!(gated.get_by_name("avg_pressure"), Some(0.0));

    // Schema is unchanged either way
    assert_eq!(inferred.to_map().len(), gated.to_map().len());
}

#[test]
fn test_payload_roundtrip_through_normalizer() {
    let payload = json!({
        "strokes": [
            {"points": [{"x": 100, "y": 100, "time": 0}, {"x": 150, "y": 120, "time": 50}, {"x": 200, "y": 130, "time": 100}]}
        ]
    });
    let strokes = normalize(&payload).unwrap();
    assert_eq!(extract_payload(&payload, None), extract(Some(&strokes), None));
}

#[test]
fn test_reported_stroke_times_drive_durations() {
    let payload = json!({"strokes": [
        {"points": [{"x": 0, "y": 0}, {"x": 30, "y": 40}], "startTime": 0, "endTime": 500},
        {"points": [{"x": 10, "y": 10}, {"x": 20, "y": 10}], "startTime": 800, "endTime": 1100}
    ]});
    let vector = extract_payload(&payload, None);

    assert_eq!(vector.get_by_name("avg_stroke_duration"), Some(400.0));
    assert_eq!(vector.get_by_name("total_duration_ms"), Some(1100.0));
}

#[test]
fn test_malformed_payload_gives_default_vector() {
    for payload in [json!({"foo": "bar"}), json!("text"), json!({"data": "data:image/png;base64,AAAA"})] {
        let vector = extract_payload(&payload, None);
        assert_eq!(vector, FeatureVector::new());
        assert_total(&vector);
    }
}
