//! Last-resort extraction from malformed JSON strings.
//!
//! Some historical records hold their click data as truncated or otherwise
//! unparseable JSON text. These scanners reconstruct just enough of it
//! (coordinates plus the optional hit-zone box) to keep the response
//! usable. They run only after strict JSON parsing has failed, and they are
//! deliberately narrow: a key lookup followed by a number, nothing more.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub(crate) struct RecoveredClick {
    pub x: f64,
    pub y: f64,
    pub hitzone_width: Option<f64>,
    pub hitzone_height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub(crate) struct RecoveredSelection {
    pub hitzone_id: Option<String>,
    pub x: f64,
    pub y: f64,
}

/// Rebuild a single `clickPosition` from malformed JSON text. Both
/// coordinates must be present; the hit-zone box is optional.
pub(crate) fn click_position_from_str(text: &str) -> Option<RecoveredClick> {
    let x = number_after(text, "\"x\"")?;
    let y = number_after(text, "\"y\"")?;
    Some(RecoveredClick {
        x,
        y,
        hitzone_width: number_after(text, "\"hitzoneWidth\""),
        hitzone_height: number_after(text, "\"hitzoneHeight\""),
    })
}

/// Rebuild index-keyed `imageSelections` entries from malformed JSON text.
/// An entry is kept when an integer key, a `click` object, and both
/// coordinates can be located; everything else is dropped.
pub(crate) fn image_selections_from_str(text: &str) -> BTreeMap<String, RecoveredSelection> {
    let mut entries = BTreeMap::new();
    let marker = "\"click\"";
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(marker) {
        let click_at = cursor + offset;
        cursor = click_at + marker.len();

        let Some(key) = index_key_before(&text[..click_at]) else {
            continue;
        };
        let body = click_object_body(&text[click_at..]);
        let (Some(x), Some(y)) = (number_after(body, "\"x\""), number_after(body, "\"y\"")) else {
            continue;
        };
        let hitzone_id = last_hitzone_id(&text[..click_at]);
        entries.insert(key, RecoveredSelection { hitzone_id, x, y });
    }

    entries
}

/// Find `key` and parse the number following its colon. Mirrors the
/// malformed shapes seen in production: unsigned decimal literals only.
fn number_after(text: &str, key: &str) -> Option<f64> {
    let start = text.find(key)? + key.len();
    let rest = text[start..].trim_start().strip_prefix(':')?.trim_start();
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Parse the quoted string following `key`'s colon.
fn string_after(text: &str, key: &str) -> Option<String> {
    let start = text.find(key)? + key.len();
    let rest = text[start..].trim_start().strip_prefix(':')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

/// The nearest `"hitzoneId": "…"` preceding the current entry.
fn last_hitzone_id(prefix: &str) -> Option<String> {
    let at = prefix.rfind("\"hitzoneId\"")?;
    string_after(&prefix[at..], "\"hitzoneId\"")
}

/// The last `"<digits>":` key appearing in `prefix` — the image index the
/// upcoming `click` object belongs to.
fn index_key_before(prefix: &str) -> Option<String> {
    let mut best = None;
    let mut at = 0;

    while let Some(offset) = prefix[at..].find('"') {
        let start = at + offset + 1;
        let Some(len) = prefix[start..].find('"') else {
            break;
        };
        let key = &prefix[start..start + len];
        let after = prefix[start + len + 1..].trim_start();
        if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) && after.starts_with(':') {
            best = Some(key.to_string());
        }
        at = start + len + 1;
    }

    best
}

/// The inside of the brace-delimited object following `"click"`. Truncated
/// objects run to the end of the text.
fn click_object_body(from_click: &str) -> &str {
    let Some(open) = from_click.find('{') else {
        return "";
    };
    let body = &from_click[open + 1..];
    match body.find('}') {
        Some(close) => &body[..close],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_truncated_click_position() {
        // Production pattern: serialization cut off mid-object.
        let text = r#"{"x": 10, "y": 20, "hitzoneWidth": 5"#;
        let click = click_position_from_str(text).unwrap();
        assert_eq!(click.x, 10.0);
        assert_eq!(click.y, 20.0);
        assert_eq!(click.hitzone_width, Some(5.0));
        assert_eq!(click.hitzone_height, None);
    }

    #[test]
    fn click_position_requires_both_coordinates() {
        assert_eq!(click_position_from_str(r#"{"x": 10, "hitzoneWidth": 5"#), None);
        assert_eq!(click_position_from_str("not json at all"), None);
    }

    #[test]
    fn recovers_truncated_image_selections() {
        let text = r#"{"0": {"hitzoneId": "zone-a", "click": {"x": 150.5, "y": 220}}, "2": {"hitzoneId": "zone-b", "click": {"x": 31, "y": 7.25, "hitzoneWi"#;
        let entries = image_selections_from_str(text);

        assert_eq!(entries.len(), 2);
        let first = &entries["0"];
        assert_eq!((first.x, first.y), (150.5, 220.0));
        assert_eq!(first.hitzone_id.as_deref(), Some("zone-a"));
        let second = &entries["2"];
        assert_eq!((second.x, second.y), (31.0, 7.25));
        assert_eq!(second.hitzone_id.as_deref(), Some("zone-b"));
    }

    #[test]
    fn image_selections_drops_entries_without_coordinates() {
        let text = r#"{"0": {"click": {"x": 5}}, "1": {"click": {"x": 8, "y": 9"#;
        let entries = image_selections_from_str(text);
        assert_eq!(entries.len(), 1);
        assert_eq!((entries["1"].x, entries["1"].y), (8.0, 9.0));
        assert_eq!(entries["1"].hitzone_id, None);
    }
}
