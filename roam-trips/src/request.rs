//! Create-trip request options accepted from callers.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use roam_core::itinerary::DateRange;

/// Who the trip is planned with; drives the localized trip name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TravelingWith {
    #[default]
    Spouse,
    Family,
    Friends,
}

/// Options for one create-trip call.
///
/// Everything except destination and the start date has a default, and the
/// boolean flags also accept the strings "true"/"false" because some
/// callers send them stringly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub destination: String,
    #[serde(default = "default_number_of_days")]
    pub number_of_days: u32,
    #[serde(default = "default_interests")]
    pub interests: Vec<String>,
    #[serde(default)]
    pub traveling_with: TravelingWith,
    #[serde(default, deserialize_with = "stringly_bool")]
    pub include_children: bool,
    #[serde(default, deserialize_with = "stringly_bool")]
    pub include_pets: bool,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_calendar_locale")]
    pub calendar_locale: String,
    pub date_range: DateRange,
}

impl CreateTripRequest {
    /// Request with every option at its default.
    pub fn new(destination: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            destination: destination.into(),
            number_of_days: default_number_of_days(),
            interests: default_interests(),
            traveling_with: TravelingWith::default(),
            include_children: false,
            include_pets: false,
            currency: default_currency(),
            calendar_locale: default_calendar_locale(),
            date_range: DateRange { start, end: None },
        }
    }
}

fn default_number_of_days() -> u32 {
    7
}

fn default_currency() -> String {
    "ILS".to_string()
}

fn default_calendar_locale() -> String {
    "he".to_string()
}

/// Interest tags sent upstream when the caller names none.
fn default_interests() -> Vec<String> {
    [
        "Must-see Attractions",
        "Great Food",
        "Hidden Gems",
        "Culture",
        "Outdoors",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn stringly_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    Ok(match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => b,
        BoolOrString::Text(s) => s.eq_ignore_ascii_case("true"),
    })
}
