//! Raw upstream trip schema: the scraped planner payload, typed.
//!
//! Every field is optional. The upstream is an undocumented consumer API
//! and individual venue records come back half-filled all the time; one
//! malformed record must degrade to missing output fields, never abort the
//! whole trip.

use serde::{Deserialize, Serialize};

/// One scraped trip: the flat item list plus the per-day visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawTrip {
    pub trip_id: Option<i64>,
    pub title: Option<String>,
    pub days: Option<Vec<RawDay>>,
    pub items: Option<Vec<RawPoi>>,
}

/// A day holds only the ids of its items, in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawDay {
    pub item_ids: Option<Vec<i64>>,
}

/// One point of interest as the upstream returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawPoi {
    pub id: Option<i64>,
    pub name: Option<String>,
    /// May carry markup and doubled whitespace.
    pub description: Option<String>,
    /// Upstream place-type code, e.g. "EATERY" or "ATTRACTION".
    pub place_type: Option<String>,
    pub geo: Option<RawGeo>,
    pub review_summary: Option<RawReviewSummary>,
    pub weekly_hours: Option<RawWeeklyHours>,
    pub photos: Option<Vec<RawPhoto>>,
    pub recommended_product: Option<RawProduct>,
    pub duration: Option<RawDuration>,
    pub tags: Option<Vec<String>>,
    pub awards: Option<Vec<RawAward>>,
    /// Site-relative detail-page link.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawGeo {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub name: Option<String>,
    pub location_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawReviewSummary {
    pub rating: Option<f64>,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawWeeklyHours {
    pub week: Option<Vec<RawWeekdayHours>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawWeekdayHours {
    /// Weekday name as the upstream spells it, e.g. "MONDAY".
    pub day: Option<String>,
    pub intervals: Option<Vec<RawInterval>>,
}

/// Open interval with hour and minute split into separate numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawInterval {
    pub open_hours: Option<u32>,
    pub open_minutes: Option<u32>,
    pub close_hours: Option<u32>,
    pub close_minutes: Option<u32>,
}

/// A photo comes as a pile of resized variants of the same shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawPhoto {
    pub sizes: Option<Vec<RawPhotoSize>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawPhotoSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: Option<String>,
}

/// Bookable product attached to a venue; only the quote matters here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub price: Option<f64>,
}

/// Visit-length hint. Either explicit minutes or a from/to range with a
/// unit; plenty of records carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawDuration {
    pub minutes: Option<i64>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawAward {
    pub display_name: Option<String>,
    pub year: Option<String>,
}
