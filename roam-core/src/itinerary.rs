//! Itinerary aggregate: the finished object handed to trip persistence.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::event::Event;

/// An event placed on the calendar with concrete trip-local timestamps.
///
/// Times are naive on purpose: trip dates are plain year/month/day and no
/// timezone conversion happens anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(flatten)]
    pub event: Event,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Trip date range. `start` anchors the scheduler; `end` is start plus the
/// trip length once known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

/// The assembled itinerary, shaped for the external trip store.
///
/// `all_events` is every normalized event; `calendar_events` and
/// `sidebar_events` partition it into placed and unplaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub name: String,
    pub num_of_days: u32,
    pub categories: Vec<Category>,
    pub all_events: Vec<Event>,
    pub sidebar_events: Vec<Event>,
    pub calendar_events: Vec<CalendarEvent>,
    pub date_range: DateRange,
    pub calendar_locale: String,
    pub destinations: Vec<String>,
}
