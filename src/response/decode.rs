//! Priority-ordered decoding of the legacy click-data shapes.
//!
//! A response may carry its clicks in any of four historically accumulated
//! fields. Each tier gets its own schema decoder; the first tier that
//! yields clicks wins, so an interaction logged redundantly in several
//! fields is never double-counted. New legacy shapes get a new decoder
//! here, never ad hoc probing at the call sites.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use super::payload::NavigationPayload;
use super::recover;
use crate::models::ParsedClick;

/// Extract every click carried by one response payload.
///
/// Total: malformed or absent click data yields an empty vector, never an
/// error. `response_ts_ms` stamps clicks whose shape carries no timestamp
/// of its own.
pub fn extract_clicks_from_response(
    payload: &NavigationPayload,
    response_ts_ms: i64,
) -> Vec<ParsedClick> {
    if let Some(raw) = &payload.image_selections {
        let clicks = decode_image_selections(raw, response_ts_ms);
        if !clicks.is_empty() {
            return clicks;
        }
    }

    if let Some(raw) = &payload.click_position {
        let image_index = payload.selected_image_index().unwrap_or(0);
        let clicks = decode_click_position(raw, image_index, response_ts_ms);
        if !clicks.is_empty() {
            return clicks;
        }
    }

    if let Some(raw) = &payload.all_clicks_tracking {
        let clicks = decode_all_clicks_tracking(raw, response_ts_ms);
        if !clicks.is_empty() {
            return clicks;
        }
    }

    if let Some(raw) = &payload.visual_click_points {
        return decode_visual_click_points(raw, response_ts_ms);
    }

    Vec::new()
}

/// Resolve a response document's timestamp to epoch milliseconds. The store
/// writes RFC 3339 strings; some legacy generations wrote epoch numbers.
/// Falls back to the time of normalization.
pub fn resolve_response_timestamp(raw: Option<&Value>) -> i64 {
    match raw {
        Some(Value::String(text)) => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_else(|_| Utc::now().timestamp_millis()),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(|ms| ms as i64)
            .unwrap_or_else(|| Utc::now().timestamp_millis()),
        _ => Utc::now().timestamp_millis(),
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawImageSelection {
    #[serde(default)]
    click: Option<RawSelectionClick>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSelectionClick {
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawClickPosition {
    x: Option<f64>,
    y: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawTrackedClick {
    x: f64,
    y: f64,
    timestamp: Option<f64>,
    is_correct_hitzone: Option<bool>,
    image_index: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawVisualPoint {
    x: f64,
    y: f64,
    timestamp: Option<f64>,
    is_correct: Option<bool>,
    image_index: Option<usize>,
}

/// Tier 1: map keyed by image index, one selection (with click) per image.
fn decode_image_selections(raw: &Value, ts_ms: i64) -> Vec<ParsedClick> {
    match raw {
        Value::Object(map) => selection_clicks(map, ts_ms),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => selection_clicks(&map, ts_ms),
            Ok(_) => {
                debug!("imageSelections string decoded to a non-object; ignoring");
                Vec::new()
            }
            Err(err) => {
                let recovered = recover::image_selections_from_str(text);
                if recovered.is_empty() {
                    debug!("unusable imageSelections string: {err}");
                    return Vec::new();
                }
                warn!(
                    "recovered {} imageSelections entries from malformed JSON",
                    recovered.len()
                );
                recovered
                    .into_iter()
                    .map(|(key, selection)| ParsedClick {
                        x: selection.x,
                        y: selection.y,
                        timestamp: ts_ms,
                        is_correct: true,
                        image_index: key.parse().unwrap_or(0),
                    })
                    .collect()
            }
        },
        _ => Vec::new(),
    }
}

fn selection_clicks(map: &serde_json::Map<String, Value>, ts_ms: i64) -> Vec<ParsedClick> {
    let mut clicks = Vec::new();
    for (key, value) in map {
        let Ok(selection) = serde_json::from_value::<RawImageSelection>(value.clone()) else {
            continue;
        };
        let Some(click) = selection.click else {
            continue;
        };
        clicks.push(ParsedClick {
            x: click.x,
            y: click.y,
            timestamp: ts_ms,
            is_correct: true,
            image_index: key.parse().unwrap_or(0),
        });
    }
    clicks
}

/// Tier 2: a single click paired with `selectedImageIndex`.
fn decode_click_position(raw: &Value, image_index: usize, ts_ms: i64) -> Vec<ParsedClick> {
    let position = match raw {
        Value::Object(_) => serde_json::from_value::<RawClickPosition>(raw.clone()).ok(),
        Value::String(text) => match serde_json::from_str::<RawClickPosition>(text) {
            Ok(position) => Some(position),
            Err(err) => match recover::click_position_from_str(text) {
                Some(recovered) => {
                    warn!("recovered clickPosition from malformed JSON");
                    Some(RawClickPosition {
                        x: Some(recovered.x),
                        y: Some(recovered.y),
                    })
                }
                None => {
                    debug!("unusable clickPosition string: {err}");
                    None
                }
            },
        },
        _ => None,
    };

    // Both coordinates must be present; a partial position falls through to
    // the next tier instead of fabricating a click at the origin.
    match position {
        Some(RawClickPosition {
            x: Some(x),
            y: Some(y),
        }) => vec![ParsedClick {
            x,
            y,
            timestamp: ts_ms,
            is_correct: true,
            image_index,
        }],
        _ => Vec::new(),
    }
}

/// Tier 3: flat array of tracked clicks with per-click metadata.
fn decode_all_clicks_tracking(raw: &Value, ts_ms: i64) -> Vec<ParsedClick> {
    let items: Vec<Value> = match raw {
        Value::Array(items) => items.clone(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                debug!("allClicksTracking string decoded to a non-array; ignoring");
                return Vec::new();
            }
            Err(err) => {
                debug!("allClicksTracking arrives as an unusable string: {err}");
                return Vec::new();
            }
        },
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawTrackedClick>(item).ok())
        .map(|click| ParsedClick {
            x: click.x,
            y: click.y,
            timestamp: resolve_click_timestamp(click.timestamp, ts_ms),
            is_correct: click.is_correct_hitzone.unwrap_or(true),
            image_index: click.image_index.unwrap_or(0),
        })
        .collect()
}

/// Tier 4: render points, either a flat array or a map keyed by image index.
fn decode_visual_click_points(raw: &Value, ts_ms: i64) -> Vec<ParsedClick> {
    match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| visual_point(item, None, ts_ms))
            .collect(),
        Value::Object(map) => {
            let mut clicks = Vec::new();
            for (key, value) in map {
                let Value::Array(items) = value else {
                    continue;
                };
                let key_index = key.parse::<usize>().ok();
                clicks.extend(items.iter().filter_map(|item| visual_point(item, key_index, ts_ms)));
            }
            clicks
        }
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed @ (Value::Array(_) | Value::Object(_))) => {
                decode_visual_click_points(&parsed, ts_ms)
            }
            Ok(_) | Err(_) => {
                debug!("unusable visualClickPoints string; ignoring");
                Vec::new()
            }
        },
        _ => Vec::new(),
    }
}

fn visual_point(value: &Value, key_index: Option<usize>, ts_ms: i64) -> Option<ParsedClick> {
    let point = serde_json::from_value::<RawVisualPoint>(value.clone()).ok()?;
    Some(ParsedClick {
        x: point.x,
        y: point.y,
        timestamp: resolve_click_timestamp(point.timestamp, ts_ms),
        is_correct: point.is_correct.unwrap_or(true),
        image_index: point.image_index.or(key_index).unwrap_or(0),
    })
}

/// A per-click timestamp of 0 is store junk; treat it as absent.
fn resolve_click_timestamp(raw: Option<f64>, fallback_ms: i64) -> i64 {
    match raw {
        Some(ms) if ms > 0.0 => ms as i64,
        _ => fallback_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: i64 = 1_717_243_200_000;

    fn payload(value: serde_json::Value) -> NavigationPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn image_selections_win_over_lower_tiers() {
        let payload = payload(serde_json::json!({
            "imageSelections": {
                "1": {"hitzoneId": "zone-a", "click": {"x": 40.0, "y": 60.0}}
            },
            "allClicksTracking": [
                {"x": 1, "y": 2, "imageIndex": 0},
                {"x": 3, "y": 4, "imageIndex": 0}
            ]
        }));

        let clicks = extract_clicks_from_response(&payload, TS);
        assert_eq!(clicks.len(), 1);
        assert_eq!((clicks[0].x, clicks[0].y), (40.0, 60.0));
        assert_eq!(clicks[0].image_index, 1);
        assert!(clicks[0].is_correct);
        assert_eq!(clicks[0].timestamp, TS);
    }

    #[test]
    fn truncated_click_position_string_recovers() {
        let payload = payload(serde_json::json!({
            "clickPosition": "{\"x\": 10, \"y\": 20, \"hitzoneWidth\": 5",
            "selectedImageIndex": 3
        }));

        let clicks = extract_clicks_from_response(&payload, TS);
        assert_eq!(clicks.len(), 1);
        assert_eq!((clicks[0].x, clicks[0].y), (10.0, 20.0));
        assert_eq!(clicks[0].image_index, 3);
    }

    #[test]
    fn click_position_without_both_coordinates_yields_nothing() {
        let payload = payload(serde_json::json!({
            "clickPosition": {"y": 20.0}
        }));
        assert!(extract_clicks_from_response(&payload, TS).is_empty());
    }

    #[test]
    fn tracking_entries_fill_defaults() {
        let payload = payload(serde_json::json!({
            "allClicksTracking": [
                {"x": 5.0, "y": 6.0, "timestamp": 1_700_000_000_123.0_f64, "isCorrectHitzone": false, "imageIndex": 2},
                {"y": 9.0}
            ]
        }));

        let clicks = extract_clicks_from_response(&payload, TS);
        assert_eq!(clicks.len(), 2);
        assert!(!clicks[0].is_correct);
        assert_eq!(clicks[0].timestamp, 1_700_000_000_123);
        // Missing numerics default to 0, correctness defaults to true.
        assert_eq!((clicks[1].x, clicks[1].y), (0.0, 9.0));
        assert!(clicks[1].is_correct);
        assert_eq!(clicks[1].image_index, 0);
        assert_eq!(clicks[1].timestamp, TS);
    }

    #[test]
    fn tracking_accepts_its_json_string_form() {
        let payload = payload(serde_json::json!({
            "allClicksTracking": "[{\"x\": 7, \"y\": 8, \"isCorrectHitzone\": true}]"
        }));

        let clicks = extract_clicks_from_response(&payload, TS);
        assert_eq!(clicks.len(), 1);
        assert_eq!((clicks[0].x, clicks[0].y), (7.0, 8.0));
    }

    #[test]
    fn visual_points_accept_index_keyed_maps() {
        let payload = payload(serde_json::json!({
            "visualClickPoints": {
                "2": [
                    {"x": 11.0, "y": 12.0},
                    {"x": 13.0, "y": 14.0, "imageIndex": 5, "isCorrect": false}
                ]
            }
        }));

        let clicks = extract_clicks_from_response(&payload, TS);
        assert_eq!(clicks.len(), 2);
        // The map key supplies the index unless the point carries its own.
        assert_eq!(clicks[0].image_index, 2);
        assert_eq!(clicks[1].image_index, 5);
        assert!(!clicks[1].is_correct);
    }

    #[test]
    fn empty_payload_yields_no_clicks() {
        assert!(extract_clicks_from_response(&NavigationPayload::default(), TS).is_empty());
    }

    #[test]
    fn empty_first_tier_falls_through() {
        let payload = payload(serde_json::json!({
            "imageSelections": {},
            "visualClickPoints": [{"x": 1.0, "y": 2.0}]
        }));

        let clicks = extract_clicks_from_response(&payload, TS);
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].image_index, 0);
    }

    #[test]
    fn response_timestamps_resolve_from_both_store_generations() {
        let iso = serde_json::json!("2024-06-01T12:00:00Z");
        assert_eq!(resolve_response_timestamp(Some(&iso)), 1_717_243_200_000);

        let epoch = serde_json::json!(1_700_000_000_000_i64);
        assert_eq!(resolve_response_timestamp(Some(&epoch)), 1_700_000_000_000);

        // Unparseable strings fall back to "now" — just assert it is recent.
        let junk = serde_json::json!("not a date");
        assert!(resolve_response_timestamp(Some(&junk)) > 1_600_000_000_000);
        assert!(resolve_response_timestamp(None) > 1_600_000_000_000);
    }
}
