//! Picking one reward out of an activity-service response.
//!
//! The service answers with either an array of activity objects or a single
//! object. Arrays are sampled uniformly; anything that is neither shape is
//! reported as "no activity returned".

use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::escape::escape_html;
use crate::error::EmptyResultError;

/// Shown in place of an item's text when it has none.
pub const MISSING_ACTIVITY_TEXT: &str = "No activity text";

/// One entry from the activity service. Only `activity` is used for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default, rename = "type")]
    pub category: Option<String>,
    #[serde(default)]
    pub participants: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl ActivityItem {
    /// Decode field by field. A field of the wrong type is left unset
    /// without affecting the others; non-objects give an empty item.
    fn from_value_lossy(value: &Value) -> Self {
        Self {
            activity: field(value, "activity"),
            category: field(value, "type"),
            participants: field(value, "participants"),
            price: field(value, "price"),
            key: field(value, "key"),
            link: field(value, "link"),
        }
    }
}

fn field<T: DeserializeOwned>(value: &Value, name: &str) -> Option<T> {
    value.get(name).and_then(|v| T::deserialize(v).ok())
}

/// Null, false, zero and the empty string count as "no item".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityPayload {
    /// Array body. `None` marks an entry that holds no item at all.
    Many(Vec<Option<ActivityItem>>),
    One(ActivityItem),
}

impl ActivityPayload {
    /// Classify a raw JSON body. Returns `None` for null and scalars.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(ActivityPayload::Many(
                items
                    .iter()
                    .map(|v| (!is_falsy(v)).then(|| ActivityItem::from_value_lossy(v)))
                    .collect(),
            )),
            value @ Value::Object(_) => {
                Some(ActivityPayload::One(ActivityItem::from_value_lossy(&value)))
            }
            _ => None,
        }
    }
}

/// The chosen activity, with its display text already HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedReward {
    text: String,
    key: Option<String>,
}

impl SelectedReward {
    fn from_item(item: ActivityItem) -> Self {
        let raw = item
            .activity
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(MISSING_ACTIVITY_TEXT);
        Self {
            text: escape_html(raw),
            key: item.key,
        }
    }

    /// Escaped display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Service-side identifier, when the item had one.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Markup fragment for the reward slot.
    pub fn to_html(&self) -> String {
        format!("<p class=\"reward\">{}</p>", self.text)
    }
}

/// Select a reward using the thread-local RNG.
pub fn select(payload: Option<ActivityPayload>) -> Result<SelectedReward, EmptyResultError> {
    select_with(payload, &mut rand::thread_rng())
}

/// Select a reward with a caller-supplied RNG.
pub fn select_with<R: Rng + ?Sized>(
    payload: Option<ActivityPayload>,
    rng: &mut R,
) -> Result<SelectedReward, EmptyResultError> {
    let item = match payload {
        Some(ActivityPayload::Many(items)) => items
            .choose(rng)
            .ok_or(EmptyResultError::NoActivitiesInCategory)?
            .clone()
            .ok_or(EmptyResultError::NoActivityReturned)?,
        Some(ActivityPayload::One(item)) => item,
        None => return Err(EmptyResultError::NoActivityReturned),
    };
    Ok(SelectedReward::from_item(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Option<ActivityPayload> {
        ActivityPayload::from_json(value)
    }

    #[test]
    fn empty_array_and_null_are_distinct_outcomes() {
        let empty = select(payload(json!([]))).unwrap_err();
        let null = select(payload(json!(null))).unwrap_err();
        assert_eq!(empty, EmptyResultError::NoActivitiesInCategory);
        assert_eq!(null, EmptyResultError::NoActivityReturned);
        assert_ne!(empty, null);
    }

    #[test]
    fn scalar_bodies_are_no_activity() {
        for body in [json!(42), json!("hello"), json!(true)] {
            assert_eq!(
                select(payload(body)).unwrap_err(),
                EmptyResultError::NoActivityReturned
            );
        }
    }

    #[test]
    fn single_object_is_used_directly() {
        let reward = select(payload(json!({"activity": "Learn to juggle", "key": "42"}))).unwrap();
        assert_eq!(reward.text(), "Learn to juggle");
        assert_eq!(reward.key(), Some("42"));
    }

    #[test]
    fn both_items_are_reachable() {
        let mut rng = Mcg128Xsl64::seed_from_u64(7);
        let body = json!([{"activity": "A"}, {"activity": "B"}]);
        let (mut a, mut b) = (0, 0);
        for _ in 0..1000 {
            match select_with(payload(body.clone()), &mut rng).unwrap().text() {
                "A" => a += 1,
                "B" => b += 1,
                other => panic!("unexpected selection {other}"),
            }
        }
        assert!(a > 0 && b > 0, "a={a} b={b}");
        assert!(a > 350 && b > 350, "selection looks biased: a={a} b={b}");
    }

    #[test]
    fn missing_or_empty_text_uses_placeholder() {
        for body in [json!({}), json!({"activity": ""}), json!({"activity": null})] {
            assert_eq!(select(payload(body)).unwrap().text(), MISSING_ACTIVITY_TEXT);
        }
    }

    #[test]
    fn malformed_array_entries_degrade_to_placeholder() {
        let reward = select(payload(json!([17]))).unwrap();
        assert_eq!(reward.text(), MISSING_ACTIVITY_TEXT);
    }

    #[test]
    fn falsy_array_entries_are_no_activity() {
        for body in [json!([null]), json!([false]), json!([0]), json!([""])] {
            assert_eq!(
                select(payload(body)).unwrap_err(),
                EmptyResultError::NoActivityReturned
            );
        }
    }

    #[test]
    fn mistyped_side_fields_keep_activity_text() {
        for body in [
            json!({"activity": "Bake bread", "key": 12345}),
            json!({"activity": "Bake bread", "participants": 1.5}),
            json!({"activity": "Bake bread", "price": "free"}),
            json!([{"activity": "Bake bread", "key": 12345, "link": false}]),
        ] {
            assert_eq!(select(payload(body)).unwrap().text(), "Bake bread");
        }
    }

    #[test]
    fn mistyped_key_is_dropped_but_text_kept() {
        let item =
            ActivityItem::from_value_lossy(&json!({"activity": "Swim", "key": 7, "price": 0.1}));
        assert_eq!(item.activity.as_deref(), Some("Swim"));
        assert_eq!(item.key, None);
        assert_eq!(item.price, Some(0.1));
    }

    #[test]
    fn selected_text_is_escaped() {
        let reward = select(payload(json!({"activity": "<script>alert(1)</script>"}))).unwrap();
        let html = reward.to_html();
        let inner = html
            .strip_prefix("<p class=\"reward\">")
            .and_then(|s| s.strip_suffix("</p>"))
            .unwrap();
        assert!(!inner.contains('<') && !inner.contains('>'));
    }

    #[test]
    fn extra_fields_are_decoded_and_unknown_ignored() {
        let item = ActivityItem::from_value_lossy(&json!({
            "activity": "Bake bread",
            "type": "cooking",
            "participants": 1,
            "price": 0.3,
            "kidFriendly": true
        }));
        assert_eq!(item.category.as_deref(), Some("cooking"));
        assert_eq!(item.participants, Some(1));
    }
}
