//! Spatial Clusterer: groups a single image's clicks into heat-map areas
//! with a progressive color/intensity tier.

pub mod algorithm;
pub mod config;

pub use algorithm::{create_heatmap_from_clicks, ColorLevel, HeatmapArea};
pub use config::HeatmapConfig;
