//! Canonical click records produced by the normalizer and aggregator.
//!
//! All coordinates are in natural (intrinsic) image pixel space; the
//! geometry module maps them into render space at display time.

use serde::{Deserialize, Serialize};

/// A single normalized participant click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedClick {
    pub x: f64,
    pub y: f64,
    /// Epoch milliseconds. Always concrete: the normalizer falls back to the
    /// time of normalization when the source record carries none.
    pub timestamp: i64,
    pub is_correct: bool,
    pub image_index: usize,
}

/// Aggregated form of a click, kept for audit and participant filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickTrackingRecord {
    pub x: f64,
    pub y: f64,
    pub timestamp: i64,
    pub hitzone_id: Option<String>,
    pub image_index: usize,
    pub is_correct_hitzone: bool,
    pub participant_id: Option<String>,
}

/// Render-oriented projection of a click, one-to-one with
/// [`ClickTrackingRecord`] but without hit-zone detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualClickPoint {
    pub x: f64,
    pub y: f64,
    pub timestamp: i64,
    pub is_correct: bool,
    pub image_index: usize,
    pub participant_id: Option<String>,
}

impl VisualClickPoint {
    pub fn to_parsed(&self) -> ParsedClick {
        ParsedClick {
            x: self.x,
            y: self.y,
            timestamp: self.timestamp,
            is_correct: self.is_correct,
            image_index: self.image_index,
        }
    }
}

/// The click recorded for one image selection, with the hit-zone box that
/// was active when it landed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionClick {
    pub x: f64,
    pub y: f64,
    pub hitzone_width: f64,
    pub hitzone_height: f64,
}

/// One keyed entry of the aggregated image-selection map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSelection {
    pub hitzone_id: String,
    pub click: SelectionClick,
}
