//! Metrics Calculator: aggregate counts and rates for one question's
//! response set.

mod types;

pub use types::NavigationMetrics;

use crate::models::{ClickTrackingRecord, ImageFile};

/// Derive the dashboard metrics from the aggregated tracking records.
///
/// Degenerate aggregates (no clicks, no files, no participants) produce
/// zeros, never NaN or infinity.
pub fn compute_navigation_metrics(
    all_clicks: &[ClickTrackingRecord],
    files: &[ImageFile],
    total_participants: usize,
) -> NavigationMetrics {
    let total_clicks = all_clicks.len();
    let correct_clicks = all_clicks
        .iter()
        .filter(|click| click.is_correct_hitzone)
        .count();
    let incorrect_clicks = total_clicks - correct_clicks;

    let average_time_per_image = average_time_per_image(all_clicks, files.len());

    let completion_rate = if total_participants > 0 {
        ((correct_clicks as f64 / total_participants as f64) * 100.0).round() as u32
    } else {
        0
    };

    NavigationMetrics {
        total_clicks,
        correct_clicks,
        incorrect_clicks,
        total_participants,
        average_time_per_image,
        completion_rate,
    }
}

/// Total interaction span divided evenly across images, in seconds, rounded
/// to one decimal for display.
fn average_time_per_image(all_clicks: &[ClickTrackingRecord], file_count: usize) -> f64 {
    if file_count == 0 || all_clicks.len() < 2 {
        return 0.0;
    }

    let mut min_ts = i64::MAX;
    let mut max_ts = i64::MIN;
    for click in all_clicks {
        min_ts = min_ts.min(click.timestamp);
        max_ts = max_ts.max(click.timestamp);
    }

    let span_secs = (max_ts - min_ts) as f64 / 1000.0;
    let average = span_secs / file_count as f64;
    (average * 10.0).round() / 10.0
}
