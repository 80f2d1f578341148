//! Question-configuration models, owned by the external config source.

use serde::{Deserialize, Serialize};

/// Rectangle in natural image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitZoneRegion {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

/// A designated correct-answer region on a stimulus image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitZone {
    pub id: String,
    #[serde(default)]
    pub region: HitZoneRegion,
}

/// Per-image descriptor from the question configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub hit_zones: Vec<HitZone>,
}

/// The navigation-flow question as configured in the research study.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionConfig {
    pub title: String,
    pub description: String,
    pub files: Vec<ImageFile>,
}
