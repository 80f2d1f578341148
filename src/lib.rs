//! Click-analytics engine for navigation-flow survey questions.
//!
//! Participants click on stimulus images; this crate turns the raw,
//! historically messy response payloads into render-ready analytics:
//!
//! - [`response`] normalizes one response's payload into canonical clicks,
//! - [`tracking`] aggregates clicks across participants into a bundle,
//! - [`heatmap`] clusters one image's clicks into intensity-tiered areas,
//! - [`geometry`] maps between natural and rendered image coordinates,
//! - [`metrics`] derives the dashboard counters.
//!
//! Everything is synchronous and pure: inputs are immutable snapshots and
//! outputs are freshly allocated, so a view can recompute on every
//! selection change. Callers should memoize per image and click set — the
//! clusterer is O(n²) in one image's clicks.

pub mod geometry;
pub mod heatmap;
pub mod metrics;
pub mod models;
pub mod response;
pub mod settings;
pub mod tracking;

pub use heatmap::{create_heatmap_from_clicks, HeatmapArea, HeatmapConfig};
pub use metrics::{compute_navigation_metrics, NavigationMetrics};
pub use models::{ClickTrackingRecord, ParsedClick, VisualClickPoint};
pub use response::{extract_clicks_from_response, NavigationPayload};
pub use tracking::{aggregate_responses, process_navigation_flow_clicks, NavigationFlowBundle};
