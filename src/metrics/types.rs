use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the navigation-flow dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationMetrics {
    pub total_clicks: usize,
    pub correct_clicks: usize,
    pub incorrect_clicks: usize,
    pub total_participants: usize,
    /// Seconds, rounded to one decimal. The total interaction span divided
    /// evenly across images — an estimate, not a per-image duration.
    pub average_time_per_image: f64,
    /// Rounded percentage of participants with at least the equivalent of
    /// one correct click.
    pub completion_rate: u32,
}
