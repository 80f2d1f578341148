//! Raw response documents as returned by the response store.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::response::NavigationPayload;

/// One participant's stored response for a navigation-flow question.
///
/// The record is read-only here; the store owns it. Field types are kept
/// loose on purpose: a junk value in one record must degrade that record,
/// not fail the whole result set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawResponseRecord {
    pub participant_id: String,
    /// RFC 3339 string or epoch milliseconds, depending on store generation.
    pub timestamp: Option<Value>,
    /// The question payload. Older store generations used the `value` key.
    #[serde(alias = "value")]
    pub data: Option<Value>,
}

impl RawResponseRecord {
    /// Decode the stored payload. A payload that is not a JSON object
    /// decodes to an empty payload rather than failing the record.
    pub fn payload(&self) -> NavigationPayload {
        let Some(value) = &self.data else {
            return NavigationPayload::default();
        };
        serde_json::from_value(value.clone()).unwrap_or_else(|err| {
            debug!(
                "response payload for {} is not an object ({err}); treating as empty",
                self.participant_id
            );
            NavigationPayload::default()
        })
    }
}

/// Decode a response-store document array. The top level must be an array;
/// individual records that do not decode are skipped with a warning.
pub fn load_records(json: &str) -> anyhow::Result<Vec<RawResponseRecord>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        anyhow::bail!("expected a JSON array of response records");
    };

    let total = items.len();
    let records: Vec<RawResponseRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("skipping response record {index}: {err}");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!("decoded {} of {} response records", records.len(), total);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_records_skips_undecodable_entries() {
        let json = r#"[
            {"participantId": "p-1", "timestamp": "2024-06-01T12:00:00Z", "data": {}},
            "not a record",
            {"participantId": "p-2", "value": {"clickPosition": {"x": 1, "y": 2}}}
        ]"#;

        let records = load_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].participant_id, "p-1");
        assert_eq!(records[1].participant_id, "p-2");
        assert!(records[1].data.is_some());
    }

    #[test]
    fn load_records_rejects_non_array_documents() {
        assert!(load_records(r#"{"responses": []}"#).is_err());
    }

    #[test]
    fn payload_tolerates_junk_data() {
        let record = RawResponseRecord {
            participant_id: "p-1".into(),
            timestamp: None,
            data: Some(Value::String("garbage".into())),
        };
        // Not an object: decodes to the empty payload, never fails.
        let payload = record.payload();
        assert!(payload.is_empty());
    }
}
