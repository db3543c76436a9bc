//! Event model: the normalized point of interest everything downstream
//! consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::labels;
use crate::time::HhMm;

/// Duration assumed when the upstream offers nothing usable.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Events at or past this duration are flagged all-day (8 hours).
pub const ALL_DAY_MIN_MINUTES: u32 = 480;

/// Visual-emphasis flag for the consumer. Has no effect on scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Unset,
    Maybe,
    High,
    Least,
    Must,
}

/// Time-of-day hint derived from the category. Informational only; the
/// scheduler never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    #[default]
    Unset,
    Morning,
    Noon,
    Afternoon,
    Sunset,
    Evening,
    Night,
    Nevermind,
}

/// One open interval within a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSpan {
    pub start: HhMm,
    pub end: HhMm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Upstream location id, kept for deep links back into the source site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
}

/// Passthrough metadata the consumer renders verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventExtra {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub rewards: Vec<String>,
}

/// A normalized point of interest.
///
/// `category` holds the classifier's label while the itinerary is being
/// assembled. The assigner stamps `category_id`, and that number is what the
/// consumer sees under the `"category"` key; the label itself never leaves
/// the process. Id 0 means not yet assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,

    /// Always present; falls back to one hour.
    pub duration: HhMm,

    #[serde(skip)]
    pub category: String,
    #[serde(rename = "category")]
    pub category_id: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub priority: Priority,
    pub preferred_time: PreferredTime,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<EventLocation>,

    /// Lowercased weekday name to open spans. Absent means the upstream had
    /// no schedule at all, which is distinct from an empty map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<BTreeMap<String, Vec<HoursSpan>>>,

    /// Newline-joined URL list; the consumer expects one composite field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    pub extra: EventExtra,

    pub all_day: bool,
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: HhMm::from_minutes(DEFAULT_DURATION_MINUTES),
            category: labels::GENERAL.to_string(),
            category_id: 0,
            description: None,
            priority: Priority::Unset,
            preferred_time: PreferredTime::Unset,
            location: None,
            opening_hours: None,
            images: None,
            more_info: None,
            price: None,
            currency: None,
            extra: EventExtra::default(),
            all_day: false,
        }
    }

    pub fn with_duration(mut self, duration: HhMm) -> Self {
        self.all_day = duration.minutes() >= ALL_DAY_MIN_MINUTES;
        self.duration = duration;
        self
    }

    pub fn with_category(mut self, label: impl Into<String>) -> Self {
        self.category = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_as_number() {
        let mut event = Event::new("42", "Louvre").with_category("Museums");
        event.category_id = 14;
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["category"], 14);
        // the label itself must not leak into the output
        assert!(json.as_object().unwrap().values().all(|v| v != "Museums"));
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let event = Event::new("1", "x");
        let json = serde_json::to_value(&event).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("preferredTime"));
        assert!(obj.contains_key("allDay"));
        assert!(!obj.contains_key("preferred_time"));
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let event = Event::new("1", "x");
        let json = serde_json::to_value(&event).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["description", "openingHours", "images", "moreInfo", "price"] {
            assert!(!obj.contains_key(key), "{key} should be omitted");
        }
    }

    #[test]
    fn test_long_events_are_all_day() {
        let event = Event::new("1", "x").with_duration(HhMm::from_hours_minutes(8, 0));
        assert!(event.all_day);
        let event = Event::new("1", "x").with_duration(HhMm::from_hours_minutes(7, 59));
        assert!(!event.all_day);
    }

    #[test]
    fn test_enum_wire_casing() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&PreferredTime::Nevermind).unwrap(),
            "\"nevermind\""
        );
    }
}
