//! Canonical stroke data
//!
//! Every raw encoding the normalizer accepts ends up as `Vec<Stroke>`.

use serde::{Deserialize, Serialize};

// ============================================================================
// POINT
// ============================================================================

/// One timestamped sample of the pen/finger position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Milliseconds, monotonic within a stroke
    pub t: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64, t: i64) -> Self {
        Self { x, y, t, pressure: None }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

// ============================================================================
// STROKE
// ============================================================================

/// One continuous pen-down to pen-up motion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<Point>,
    /// Pen-down time reported by the capture client, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Pen-up time reported by the capture client, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl Stroke {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            start_time: None,
            end_time: None,
        }
    }

    /// Attach client-reported pen-down/pen-up times
    pub fn with_timing(mut self, start_time: Option<i64>, end_time: Option<i64>) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Euclidean path length (0 for fewer than 2 points)
    pub fn path_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }

    /// Pen-down to pen-up time when both are reported, otherwise the
    /// elapsed time between first and last point. Never negative.
    pub fn duration_ms(&self) -> i64 {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            return end.saturating_sub(start).max(0);
        }
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.t.saturating_sub(first.t).max(0),
            _ => 0,
        }
    }
}

impl From<Vec<Point>> for Stroke {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

// ============================================================================
// DEVICE CAPABILITIES
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    Mouse,
    Pen,
    Touch,
    #[default]
    Unknown,
}

/// Capture device descriptor sent alongside a sample.
///
/// Decides which secondary features are computed; never changes the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    #[serde(default)]
    pub supports_pressure: bool,
    #[serde(default)]
    pub pointer_type: PointerType,
}

impl DeviceCapabilities {
    /// Capabilities implied by the data itself: pressure is supported
    /// when at least one point carries a pressure value.
    pub fn infer(strokes: &[Stroke]) -> Self {
        let supports_pressure = strokes
            .iter()
            .flat_map(|s| s.points.iter())
            .any(|p| p.pressure.is_some());

        Self {
            supports_pressure,
            pointer_type: PointerType::Unknown,
        }
    }
}
