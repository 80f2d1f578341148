//! Greedy spatial clustering of one image's clicks into heat-map areas.

use serde::Serialize;

use crate::heatmap::config::HeatmapConfig;
use crate::models::ParsedClick;

/// Progressive intensity tier of a heat-map area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorLevel {
    Yellow,
    Orange,
    Red,
}

impl ColorLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorLevel::Yellow => "yellow",
            ColorLevel::Orange => "orange",
            ColorLevel::Red => "red",
        }
    }
}

/// A clustered group of spatially close clicks, rendered as one blob.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapArea {
    /// Centroid, natural pixels.
    pub x: f64,
    pub y: f64,
    /// Rendered blob radius, grown with intensity.
    pub radius: f64,
    pub intensity: f64,
    pub color_level: ColorLevel,
    /// True when at least one member click landed in a hit-zone.
    pub is_correct: bool,
    pub clicks: Vec<ParsedClick>,
}

/// Group one image's clicks into heat-map areas.
///
/// Single greedy pass in input order: each unassigned click seeds an area
/// and absorbs every still-unassigned click within the cluster radius. The
/// result is an exact partition — every input click lands in exactly one
/// area — but not a globally optimal clustering; grouping depends on input
/// order.
pub fn create_heatmap_from_clicks(
    clicks: &[ParsedClick],
    config: &HeatmapConfig,
) -> Vec<HeatmapArea> {
    if clicks.is_empty() {
        return Vec::new();
    }

    let mut assigned = vec![false; clicks.len()];
    let mut areas = Vec::new();

    for seed in 0..clicks.len() {
        if assigned[seed] {
            continue;
        }

        let mut members = Vec::new();
        for (index, click) in clicks.iter().enumerate() {
            if assigned[index] {
                continue;
            }
            if distance(&clicks[seed], click) <= config.cluster_radius {
                assigned[index] = true;
                members.push(index);
            }
        }

        areas.push(build_area(clicks, &members, config));
    }

    areas
}

fn build_area(clicks: &[ParsedClick], members: &[usize], config: &HeatmapConfig) -> HeatmapArea {
    let count = members.len() as f64;
    let x = members.iter().map(|&i| clicks[i].x).sum::<f64>() / count;
    let y = members.iter().map(|&i| clicks[i].y).sum::<f64>() / count;

    let (color_level, intensity) = classify(members.len(), config);
    let is_correct = members.iter().any(|&i| clicks[i].is_correct);

    HeatmapArea {
        x,
        y,
        radius: config.cluster_radius * (1.0 + intensity * config.radius_growth),
        intensity,
        color_level,
        is_correct,
        clicks: members.iter().map(|&i| clicks[i].clone()).collect(),
    }
}

/// Color and intensity are monotonic in cluster size.
fn classify(member_count: usize, config: &HeatmapConfig) -> (ColorLevel, f64) {
    if member_count >= config.red_threshold {
        (ColorLevel::Red, 1.0)
    } else if member_count >= config.orange_threshold {
        (ColorLevel::Orange, 0.7)
    } else if member_count == 2 {
        (ColorLevel::Yellow, 0.4)
    } else {
        (ColorLevel::Yellow, 0.2)
    }
}

fn distance(a: &ParsedClick, b: &ParsedClick) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}
