//! Stroke Module - Canonical stroke data & raw payload normalization
//!
//! - `types.rs`: `Point`, `Stroke`, `DeviceCapabilities`
//! - `normalize.rs`: raw JSON payload -> `Vec<Stroke>` (or `None`)

pub mod types;
pub mod normalize;

pub use types::{DeviceCapabilities, Point, PointerType, Stroke};
pub use normalize::{is_image_data_uri, normalize, normalize_str};
