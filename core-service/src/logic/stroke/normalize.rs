//! Stroke Normalizer
//!
//! Parses the raw payload shapes sent by capture clients into `Vec<Stroke>`.
//!
//! Resolution order:
//! 1. `{"raw": [...]}`
//! 2. `{"strokes": [...]}`
//! 3. `{"data": [...]}`
//! 4. bare `[...]` (already strokes of points)
//! 5. `{"data": "data:image/..."}` -> no geometry
//! 6. anything else -> unrecognized
//!
//! Failure never panics: it yields `None`, meaning "no geometry available".

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::types::{Point, Stroke};
use crate::constants::ESTIMATED_POINT_INTERVAL_MS;

/// Object keys holding a stroke list, in priority order
const STROKE_LIST_KEYS: &[&str] = &["raw", "strokes", "data"];

/// Keys accepted for a point timestamp, in priority order
const TIME_KEYS: &[&str] = &["t", "time", "timestamp"];

/// Stroke-level pen-down/pen-up keys
const START_TIME_KEYS: &[&str] = &["startTime", "start_time"];
const END_TIME_KEYS: &[&str] = &["endTime", "end_time"];

static IMAGE_DATA_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/[A-Za-z0-9.+-]+(;[^,]*)?,").expect("static data-uri pattern")
});

/// Shape detected for a raw payload
#[derive(Debug)]
enum PayloadShape<'a> {
    Strokes(&'a [Value]),
    Image,
    Unrecognized,
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Normalize a JSON text payload. Invalid JSON yields `None`.
pub fn normalize_str(raw: &str) -> Option<Vec<Stroke>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => normalize(&value),
        Err(e) => {
            log::debug!("Stroke payload is not valid JSON: {}", e);
            None
        }
    }
}

/// Normalize an already-parsed payload
pub fn normalize(raw: &Value) -> Option<Vec<Stroke>> {
    match resolve_shape(raw) {
        PayloadShape::Strokes(list) => {
            let strokes: Vec<Stroke> = list.iter().map(parse_stroke).collect();
            log::debug!(
                "Normalized {} strokes ({} points)",
                strokes.len(),
                strokes.iter().map(Stroke::len).sum::<usize>()
            );
            Some(strokes)
        }
        PayloadShape::Image => {
            log::debug!("Image-only sample, no stroke geometry");
            None
        }
        PayloadShape::Unrecognized => {
            log::debug!("Unrecognized stroke payload shape");
            None
        }
    }
}

/// True if the string is a `data:image/...` URI
pub fn is_image_data_uri(s: &str) -> bool {
    IMAGE_DATA_URI.is_match(s)
}

// ============================================================================
// SHAPE RESOLUTION
// ============================================================================

fn resolve_shape(raw: &Value) -> PayloadShape<'_> {
    match raw {
        Value::Object(map) => resolve_object(map),
        Value::Array(list) => PayloadShape::Strokes(list),
        _ => PayloadShape::Unrecognized,
    }
}

fn resolve_object(map: &Map<String, Value>) -> PayloadShape<'_> {
    for key in STROKE_LIST_KEYS {
        if let Some(Value::Array(list)) = map.get(*key) {
            return PayloadShape::Strokes(list);
        }
    }

    match map.get("data") {
        Some(Value::String(s)) if is_image_data_uri(s) => PayloadShape::Image,
        _ => PayloadShape::Unrecognized,
    }
}

// ============================================================================
// STROKE / POINT PARSING
// ============================================================================

/// A stroke is a bare point array or `{"points": [...], "startTime", "endTime"}`.
/// Anything else becomes an empty stroke so positions are preserved.
fn parse_stroke(value: &Value) -> Stroke {
    match value {
        Value::Array(points) => Stroke::new(parse_points(points)),
        Value::Object(map) => {
            let points = match map.get("points") {
                Some(Value::Array(points)) => parse_points(points),
                _ => Vec::new(),
            };
            Stroke::new(points).with_timing(
                first_timestamp(map, START_TIME_KEYS),
                first_timestamp(map, END_TIME_KEYS),
            )
        }
        _ => Stroke::default(),
    }
}

fn parse_points(points: &[Value]) -> Vec<Point> {
    points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| parse_point(p, i))
        .collect()
}

fn first_timestamp(map: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|k| timestamp(map.get(*k)))
}

/// `{"x":..,"y":..,"t":..,"pressure":..}` or `[x, y]` / `[x, y, t]`.
/// Points without a time get `index * 10` ms.
fn parse_point(value: &Value, index: usize) -> Option<Point> {
    let estimated_t = (index as i64).saturating_mul(ESTIMATED_POINT_INTERVAL_MS);

    match value {
        Value::Object(map) => {
            let x = finite(map.get("x"))?;
            let y = finite(map.get("y"))?;
            let t = first_timestamp(map, TIME_KEYS).unwrap_or(estimated_t);

            Some(Point {
                x,
                y,
                t,
                pressure: finite(map.get("pressure")),
            })
        }
        Value::Array(items) => {
            let x = finite(items.first())?;
            let y = finite(items.get(1))?;
            let t = timestamp(items.get(2)).unwrap_or(estimated_t);
            Some(Point::new(x, y, t))
        }
        _ => None,
    }
}

fn finite(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|v| v.is_finite())
}

fn timestamp(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    if let Some(t) = value.as_i64() {
        return Some(t);
    }
    // Fractional ms (performance.now()) are rounded
    value
        .as_f64()
        .filter(|t| t.is_finite() && t.abs() < i64::MAX as f64)
        .map(|t| t.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn simple_stroke() -> Value {
        json!([{"x": 0, "y": 0, "t": 0}, {"x": 10, "y": 0, "t": 20}])
    }

    #[test]
    fn test_raw_key() {
        let strokes = normalize(&json!({"raw": [simple_stroke()]})).unwrap();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].points[1], Point::new(10.0, 0.0, 20));
    }

    #[test]
    fn test_strokes_key() {
        let strokes = normalize(&json!({"strokes": [simple_stroke(), simple_stroke()]})).unwrap();
        assert_eq!(strokes.len(), 2);
    }

    #[test]
    fn test_data_array() {
        let strokes = normalize(&json!({"data": [simple_stroke()]})).unwrap();
        assert_eq!(strokes.len(), 1);
    }

    #[test]
    fn test_bare_array() {
        let strokes = normalize(&json!([simple_stroke()])).unwrap();
        assert_eq!(strokes[0].len(), 2);
    }

    #[test]
    fn test_resolution_order_prefers_raw() {
        let payload = json!({
            "strokes": [simple_stroke(), simple_stroke()],
            "raw": [simple_stroke()],
        });
        assert_eq!(normalize(&payload).unwrap().len(), 1);
    }

    #[test]
    fn test_non_array_raw_falls_through() {
        let payload = json!({"raw": "oops", "strokes": [simple_stroke()]});
        assert_eq!(normalize(&payload).unwrap().len(), 1);
    }

    #[test]
    fn test_image_data_uri() {
        let payload = json!({"data": "data:image/png;base64,iVBORw0KGgo="});
        assert!(normalize(&payload).is_none());
        assert!(is_image_data_uri("data:image/svg+xml,<svg/>"));
        assert!(!is_image_data_uri("hello"));
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert!(normalize(&json!({"foo": "bar"})).is_none());
        assert!(normalize(&json!({"data": "not an image"})).is_none());
        assert!(normalize(&json!(42)).is_none());
        assert!(normalize(&Value::Null).is_none());
    }

    #[test]
    fn test_invalid_json() {
        assert!(normalize_str("{not json").is_none());
        assert!(normalize_str("").is_none());
        assert_eq!(normalize_str("[]").unwrap().len(), 0);
    }

    #[test]
    fn test_stroke_object_with_points() {
        let payload = json!({"strokes": [{"points": [{"x": 1, "y": 2, "time": 5}], "startTime": 0}]});
        let strokes = normalize(&payload).unwrap();
        assert_eq!(strokes[0].points[0], Point::new(1.0, 2.0, 5));
        assert_eq!(strokes[0].start_time, Some(0));
        assert_eq!(strokes[0].end_time, None);
    }

    #[test]
    fn test_stroke_timing_keys() {
        let payload = json!([
            {"points": [{"x": 0, "y": 0}, {"x": 4, "y": 3}], "startTime": 1000, "endTime": 1500.4},
            {"points": [[0, 0]], "start_time": 2000, "end_time": 2100},
            [[0, 0], [1, 1]]
        ]);
        let strokes = normalize(&payload).unwrap();

        assert_eq!((strokes[0].start_time, strokes[0].end_time), (Some(1000), Some(1500)));
        assert_eq!(strokes[0].duration_ms(), 500);
        assert_eq!((strokes[1].start_time, strokes[1].end_time), (Some(2000), Some(2100)));
        assert_eq!((strokes[2].start_time, strokes[2].end_time), (None, None));
        assert_eq!(strokes[2].duration_ms(), 10);
    }

    #[test]
    fn test_invalid_stroke_keeps_position() {
        let payload = json!([42, simple_stroke()]);
        let strokes = normalize(&payload).unwrap();
        assert_eq!(strokes.len(), 2);
        assert!(strokes[0].is_empty());
        assert_eq!(strokes[1].len(), 2);
    }

    #[test]
    fn test_missing_time_is_estimated() {
        let payload = json!([[{"x": 0, "y": 0}, {"x": 1, "y": 1}, {"x": 2, "y": 2}]]);
        let strokes = normalize(&payload).unwrap();
        let times: Vec<i64> = strokes[0].points.iter().map(|p| p.t).collect();
        assert_eq!(times, vec![0, 10, 20]);
    }

    #[test]
    fn test_tuple_points_and_pressure() {
        let payload = json!([[[0, 0, 0], [3, 4, 8]], [{"x": 1, "y": 1, "t": 9.6, "pressure": 0.5}]]);
        let strokes = normalize(&payload).unwrap();
        assert_eq!(strokes[0].points[1], Point::new(3.0, 4.0, 8));
        assert_eq!(strokes[1].points[0].t, 10);
        assert_eq!(strokes[1].points[0].pressure, Some(0.5));
    }

    #[test]
    fn test_bad_points_dropped() {
        let payload = json!([[{"x": "a", "y": 0}, {"y": 1}, null, {"x": 1, "y": 1, "t": 3}]]);
        let strokes = normalize(&payload).unwrap();
        assert_eq!(strokes[0].len(), 1);
        assert_eq!(strokes[0].points[0].t, 3);
    }
}
