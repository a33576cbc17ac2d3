use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ScaleContext;

/// Hovered sample exposed to the presentation layer.
///
/// Exists only while the pointer is inside the drawing surface and a series
/// is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverState {
    pub index: usize,
    pub price: f64,
    pub time: DateTime<Utc>,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Resolves a pointer x position to the nearest sample index.
///
/// Ties resolve to the lowest index and results are clamped to the valid
/// index range.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverLocator;

impl HoverLocator {
    /// Constant-time lookup through the inverse of the affine x mapping.
    ///
    /// Only the neighbours of the inverted position are compared, using the
    /// same distance as `nearest_index_scan`, so both paths agree.
    #[must_use]
    pub fn nearest_index(scale: ScaleContext, pointer_x: f64) -> Option<usize> {
        if !pointer_x.is_finite() {
            return None;
        }
        let count = scale.sample_count();
        let Some(fractional) = scale.x_to_fractional_index(pointer_x) else {
            return (count > 0).then_some(0);
        };

        let last = count - 1;
        let anchor = fractional.floor().clamp(0.0, last as f64) as usize;
        let start = anchor.saturating_sub(1);
        let end = (anchor + 1).min(last);

        (start..=end).min_by_key(|&index| distance(scale, index, pointer_x))
    }

    /// Reference linear scan over every sample.
    #[must_use]
    pub fn nearest_index_scan(scale: ScaleContext, pointer_x: f64) -> Option<usize> {
        if !pointer_x.is_finite() {
            return None;
        }
        (0..scale.sample_count()).min_by_key(|&index| distance(scale, index, pointer_x))
    }
}

fn distance(scale: ScaleContext, index: usize, pointer_x: f64) -> OrderedFloat<f64> {
    OrderedFloat((scale.to_x(index) - pointer_x).abs())
}
