//! Optional file-backed tuning for the analysis CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::heatmap::HeatmapConfig;

/// Engine tuning loaded from a settings JSON file. Every field has a
/// default, so a partial file only overrides what it names; malformed
/// content falls back to the defaults entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisSettings {
    pub cluster_radius: f64,
    pub red_threshold: usize,
    pub orange_threshold: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let config = HeatmapConfig::default();
        Self {
            cluster_radius: config.cluster_radius,
            red_threshold: config.red_threshold,
            orange_threshold: config.orange_threshold,
        }
    }
}

impl AnalysisSettings {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Ok(serde_json::from_str(&contents).unwrap_or_default())
    }

    pub fn heatmap_config(&self) -> HeatmapConfig {
        HeatmapConfig {
            cluster_radius: self.cluster_radius,
            red_threshold: self.red_threshold,
            orange_threshold: self.orange_threshold,
            ..HeatmapConfig::default()
        }
    }
}
