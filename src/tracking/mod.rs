//! Click Aggregator: merges per-response click lists across participants
//! into the dataset-wide tracking structures consumed by the dashboard.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::models::{
    ClickTrackingRecord, ImageFile, ImageSelection, ParsedClick, RawResponseRecord,
    SelectionClick, VisualClickPoint,
};
use crate::response::{extract_clicks_from_response, resolve_response_timestamp, NavigationPayload};

/// Hit-zone box assumed when a response carries no size of its own.
pub const DEFAULT_HITZONE_SIZE: f64 = 50.0;

/// Per-response aggregation output, before participant merging.
#[derive(Debug, Clone, Default)]
pub struct ProcessedClicks {
    pub all_clicks_tracking: Vec<ClickTrackingRecord>,
    pub visual_click_points: Vec<VisualClickPoint>,
    pub image_selections: BTreeMap<String, ImageSelection>,
}

/// The render-ready bundle handed to the presentation layer.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationFlowBundle {
    pub files: Vec<ImageFile>,
    pub total_participants: usize,
    pub all_clicks_tracking: Vec<ClickTrackingRecord>,
    pub visual_click_points: Vec<VisualClickPoint>,
    pub image_selections: BTreeMap<String, ImageSelection>,
}

impl NavigationFlowBundle {
    /// Unique participant ids, in first-seen order.
    pub fn participant_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for point in &self.visual_click_points {
            let Some(id) = &point.participant_id else {
                continue;
            };
            if !ids.iter().any(|seen| seen == id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// Visual points for one image, optionally narrowed to one participant.
    pub fn visual_points_for(
        &self,
        image_index: usize,
        participant: Option<&str>,
    ) -> Vec<VisualClickPoint> {
        self.visual_click_points
            .iter()
            .filter(|point| point.image_index == image_index)
            .filter(|point| match participant {
                Some(id) => point.participant_id.as_deref() == Some(id),
                None => true,
            })
            .cloned()
            .collect()
    }

    /// Canonical clicks for one image, ready for the heat-map clusterer.
    pub fn clicks_for_image(
        &self,
        image_index: usize,
        participant: Option<&str>,
    ) -> Vec<ParsedClick> {
        self.visual_points_for(image_index, participant)
            .iter()
            .map(VisualClickPoint::to_parsed)
            .collect()
    }
}

/// Fan one response's normalized clicks out into tracking records, visual
/// points, and keyed image selections.
///
/// Pure: the caller accumulates the outputs across responses. Selection keys
/// are `"{participant}-{image}-{running index}"`, which cannot collide
/// within one aggregation pass.
pub fn process_navigation_flow_clicks(
    clicks: &[ParsedClick],
    payload: &NavigationPayload,
    participant_id: &str,
    response_index: usize,
) -> ProcessedClicks {
    let mut processed = ProcessedClicks::default();

    let hitzone_id = payload
        .selected_hitzone()
        .or_else(|| payload.hitzone_id())
        .map(str::to_owned)
        .unwrap_or_else(|| format!("hitzone-{response_index}"));

    let (click_width, click_height) = payload.click_position_size();
    let hitzone_width = click_width
        .or_else(|| payload.hitzone_width())
        .unwrap_or(DEFAULT_HITZONE_SIZE);
    let hitzone_height = click_height
        .or_else(|| payload.hitzone_height())
        .unwrap_or(DEFAULT_HITZONE_SIZE);

    for click in clicks {
        processed.all_clicks_tracking.push(ClickTrackingRecord {
            x: click.x,
            y: click.y,
            timestamp: click.timestamp,
            hitzone_id: Some(hitzone_id.clone()),
            image_index: click.image_index,
            is_correct_hitzone: click.is_correct,
            participant_id: Some(participant_id.to_owned()),
        });

        processed.visual_click_points.push(VisualClickPoint {
            x: click.x,
            y: click.y,
            timestamp: click.timestamp,
            is_correct: click.is_correct,
            image_index: click.image_index,
            participant_id: Some(participant_id.to_owned()),
        });

        let key = format!(
            "{participant_id}-{}-{}",
            click.image_index,
            processed.all_clicks_tracking.len()
        );
        processed.image_selections.insert(
            key,
            ImageSelection {
                hitzone_id: hitzone_id.clone(),
                click: SelectionClick {
                    x: click.x,
                    y: click.y,
                    hitzone_width,
                    hitzone_height,
                },
            },
        );
    }

    processed
}

/// Aggregate a full response set into the render-ready bundle.
///
/// Every response is normalized, fanned out, and merged; a response whose
/// payload yields no clicks still counts toward the participant total.
pub fn aggregate_responses(
    records: &[RawResponseRecord],
    files: &[ImageFile],
) -> NavigationFlowBundle {
    let mut bundle = NavigationFlowBundle {
        files: files.to_vec(),
        total_participants: records.len(),
        ..NavigationFlowBundle::default()
    };

    for (index, record) in records.iter().enumerate() {
        let payload = record.payload();
        let timestamp = resolve_response_timestamp(record.timestamp.as_ref());
        let clicks = extract_clicks_from_response(&payload, timestamp);
        if clicks.is_empty() {
            debug!("response {index} ({}) carries no clicks", record.participant_id);
            continue;
        }

        let processed =
            process_navigation_flow_clicks(&clicks, &payload, &record.participant_id, index);
        bundle.all_clicks_tracking.extend(processed.all_clicks_tracking);
        bundle.visual_click_points.extend(processed.visual_click_points);
        bundle.image_selections.extend(processed.image_selections);
    }

    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(x: f64, y: f64, image_index: usize, is_correct: bool) -> ParsedClick {
        ParsedClick {
            x,
            y,
            timestamp: 1_700_000_000_000,
            is_correct,
            image_index,
        }
    }

    #[test]
    fn fan_out_produces_one_record_per_click() {
        let payload: NavigationPayload = serde_json::from_value(serde_json::json!({
            "selectedHitzone": "zone-7",
            "hitzoneWidth": 80.0,
        }))
        .unwrap();
        let clicks = vec![click(10.0, 20.0, 0, true), click(30.0, 40.0, 1, false)];

        let processed = process_navigation_flow_clicks(&clicks, &payload, "p-1", 4);

        assert_eq!(processed.all_clicks_tracking.len(), 2);
        assert_eq!(processed.visual_click_points.len(), 2);
        assert_eq!(processed.image_selections.len(), 2);

        let first = &processed.all_clicks_tracking[0];
        assert_eq!(first.hitzone_id.as_deref(), Some("zone-7"));
        assert_eq!(first.participant_id.as_deref(), Some("p-1"));
        assert!(first.is_correct_hitzone);
        assert!(!processed.all_clicks_tracking[1].is_correct_hitzone);

        let selection = &processed.image_selections["p-1-0-1"];
        assert_eq!(selection.hitzone_id, "zone-7");
        assert_eq!(selection.click.hitzone_width, 80.0);
        assert_eq!(selection.click.hitzone_height, DEFAULT_HITZONE_SIZE);
        assert!(processed.image_selections.contains_key("p-1-1-2"));
    }

    #[test]
    fn hitzone_id_falls_back_to_response_index() {
        let payload = NavigationPayload::default();
        let clicks = vec![click(1.0, 2.0, 0, true)];
        let processed = process_navigation_flow_clicks(&clicks, &payload, "p-2", 7);
        assert_eq!(
            processed.all_clicks_tracking[0].hitzone_id.as_deref(),
            Some("hitzone-7")
        );
    }

    #[test]
    fn aggregate_counts_every_response_as_a_participant() {
        let records: Vec<RawResponseRecord> = serde_json::from_value(serde_json::json!([
            {
                "participantId": "p-1",
                "timestamp": "2024-06-01T12:00:00Z",
                "data": {"allClicksTracking": [
                    {"x": 100, "y": 100, "imageIndex": 0, "isCorrectHitzone": true},
                    {"x": 300, "y": 300, "imageIndex": 1, "isCorrectHitzone": false}
                ]}
            },
            {
                "participantId": "p-2",
                "timestamp": "2024-06-01T12:05:00Z",
                "data": {"clickPosition": {"x": 50, "y": 60}, "selectedImageIndex": 0}
            },
            {
                "participantId": "p-3",
                "data": {}
            }
        ]))
        .unwrap();

        let bundle = aggregate_responses(&records, &[]);

        assert_eq!(bundle.total_participants, 3);
        assert_eq!(bundle.all_clicks_tracking.len(), 3);
        assert_eq!(bundle.visual_click_points.len(), 3);
        assert_eq!(bundle.participant_ids(), vec!["p-1", "p-2"]);

        let image_zero = bundle.visual_points_for(0, None);
        assert_eq!(image_zero.len(), 2);
        let only_p2 = bundle.visual_points_for(0, Some("p-2"));
        assert_eq!(only_p2.len(), 1);
        assert_eq!((only_p2[0].x, only_p2[0].y), (50.0, 60.0));
    }

    #[test]
    fn selection_keys_never_collide_across_images() {
        let payload = NavigationPayload::default();
        let clicks = vec![
            click(1.0, 1.0, 0, true),
            click(2.0, 2.0, 0, true),
            click(3.0, 3.0, 2, true),
        ];
        let processed = process_navigation_flow_clicks(&clicks, &payload, "p-9", 0);
        let keys: Vec<String> = processed.image_selections.keys().cloned().collect();
        assert_eq!(keys, ["p-9-0-1", "p-9-0-2", "p-9-2-3"]);
    }
}
