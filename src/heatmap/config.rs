/// Configuration for heat-map clustering with tunable thresholds.
#[derive(Debug, Clone)]
pub struct HeatmapConfig {
    /// Clicks within this distance (natural pixels) of a seed click join
    /// its area.
    pub cluster_radius: f64,

    /// Member count at which an area renders red at full intensity.
    pub red_threshold: usize,
    /// Member count at which an area renders orange.
    pub orange_threshold: usize,

    /// The rendered blob radius grows by this fraction at full intensity.
    pub radius_growth: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            cluster_radius: 14.0,
            red_threshold: 5,
            orange_threshold: 3,
            radius_growth: 0.3,
        }
    }
}
