//! Wire shape of a navigation-flow response payload.
//!
//! The click data accumulated several legacy encodings over the life of the
//! platform. Each carrier field may hold the structured value or a string
//! with its JSON serialization, and scalar fields occasionally hold junk of
//! the wrong type, so everything here decodes tolerantly: a bad field
//! degrades to "absent" instead of failing the record.

use serde::Deserialize;
use serde_json::Value;

/// A scalar that keeps wrong-typed junk from failing the whole payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Lenient<T> {
    Value(T),
    Junk(Value),
}

impl<T> Lenient<T> {
    fn value(&self) -> Option<&T> {
        match self {
            Lenient::Value(v) => Some(v),
            Lenient::Junk(_) => None,
        }
    }
}

/// One response's click payload, with every legacy carrier field present.
///
/// The four click carriers stay as raw [`Value`]s here; the decoders in
/// [`super::decode`] interpret them in priority order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationPayload {
    pub(crate) image_selections: Option<Value>,
    pub(crate) click_position: Option<Value>,
    pub(crate) all_clicks_tracking: Option<Value>,
    pub(crate) visual_click_points: Option<Value>,
    selected_image_index: Option<Lenient<i64>>,
    selected_hitzone: Option<Lenient<String>>,
    hitzone_id: Option<Lenient<String>>,
    hitzone_width: Option<Lenient<f64>>,
    hitzone_height: Option<Lenient<f64>>,
}

impl NavigationPayload {
    /// True when no carrier field holds anything at all.
    pub fn is_empty(&self) -> bool {
        self.image_selections.is_none()
            && self.click_position.is_none()
            && self.all_clicks_tracking.is_none()
            && self.visual_click_points.is_none()
    }

    /// Image index paired with the single-click `clickPosition` shape.
    pub fn selected_image_index(&self) -> Option<usize> {
        self.selected_image_index
            .as_ref()
            .and_then(Lenient::value)
            .map(|index| (*index).max(0) as usize)
    }

    pub fn selected_hitzone(&self) -> Option<&str> {
        self.selected_hitzone
            .as_ref()
            .and_then(Lenient::value)
            .map(String::as_str)
    }

    pub fn hitzone_id(&self) -> Option<&str> {
        self.hitzone_id
            .as_ref()
            .and_then(Lenient::value)
            .map(String::as_str)
    }

    pub fn hitzone_width(&self) -> Option<f64> {
        self.hitzone_width.as_ref().and_then(Lenient::value).copied()
    }

    pub fn hitzone_height(&self) -> Option<f64> {
        self.hitzone_height.as_ref().and_then(Lenient::value).copied()
    }

    /// Hit-zone size recorded alongside the structured `clickPosition`
    /// object, when that shape is present.
    pub(crate) fn click_position_size(&self) -> (Option<f64>, Option<f64>) {
        let Some(object) = self.click_position.as_ref().and_then(Value::as_object) else {
            return (None, None);
        };
        (
            object.get("hitzoneWidth").and_then(Value::as_f64),
            object.get("hitzoneHeight").and_then(Value::as_f64),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_typed_scalars_degrade_to_absent() {
        let payload: NavigationPayload = serde_json::from_value(serde_json::json!({
            "selectedHitzone": 42,
            "hitzoneWidth": "wide",
            "selectedImageIndex": 2,
        }))
        .unwrap();

        assert_eq!(payload.selected_hitzone(), None);
        assert_eq!(payload.hitzone_width(), None);
        assert_eq!(payload.selected_image_index(), Some(2));
        assert!(payload.is_empty());
    }

    #[test]
    fn click_position_size_reads_only_the_object_shape() {
        let payload: NavigationPayload = serde_json::from_value(serde_json::json!({
            "clickPosition": {"x": 1.0, "y": 2.0, "hitzoneWidth": 60.0, "hitzoneHeight": 40.0},
        }))
        .unwrap();
        assert_eq!(payload.click_position_size(), (Some(60.0), Some(40.0)));

        let stringly: NavigationPayload = serde_json::from_value(serde_json::json!({
            "clickPosition": "{\"x\": 1, \"y\": 2, \"hitzoneWidth\": 60}",
        }))
        .unwrap();
        assert_eq!(stringly.click_position_size(), (None, None));
    }
}
