//! Group weights shared by both comparison paths

use crate::logic::features::layout::feature_group;
use crate::logic::features::FeatureGroup;

pub fn group_weight(group: FeatureGroup) -> f64 {
    match group {
        FeatureGroup::Velocity | FeatureGroup::Shape => 1.5,
        FeatureGroup::Basic | FeatureGroup::Stroke => 1.0,
        FeatureGroup::Geometry | FeatureGroup::Pressure => 0.5,
    }
}

/// Weight of the feature at `index` (0 outside the layout)
pub fn feature_weight(index: usize) -> f64 {
    feature_group(index).map(group_weight).unwrap_or(0.0)
}

/// Saturating one of these is a critical deviation
pub fn is_primary(group: FeatureGroup) -> bool {
    matches!(group, FeatureGroup::Velocity | FeatureGroup::Shape)
}

pub fn is_primary_index(index: usize) -> bool {
    feature_group(index).map(is_primary).unwrap_or(false)
}
