//! Normalizer: scraped points of interest to events, raw days to buckets.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use roam_core::classify::{classify, preferred_time_for};
use roam_core::event::{
    ALL_DAY_MIN_MINUTES, DEFAULT_DURATION_MINUTES, Event, EventExtra, EventLocation, HoursSpan,
    Priority,
};
use roam_core::schedule::DayBucket;
use roam_core::time::HhMm;

use crate::types::{RawDuration, RawPhoto, RawPoi, RawTrip, RawWeeklyHours};

/// Per-trip knobs the normalizer needs from the create-trip request.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Currency the upstream was asked to quote prices in.
    pub currency: String,
    /// Site base for making relative detail links absolute.
    pub link_base: String,
}

/// Ratings at exactly this value with more than `TOP_RATING_MIN_REVIEWS`
/// reviews mark a venue high priority even without an award.
const TOP_RATING: f64 = 5.0;
const TOP_RATING_MIN_REVIEWS: u64 = 1000;

/// Normalize a whole trip: every item plus the per-day buckets.
///
/// Items without an upstream id are dropped. Buckets and stores reference
/// events by id, so an unkeyable record has nowhere to go.
pub fn normalize_trip(raw: &RawTrip, opts: &NormalizeOptions) -> (Vec<Event>, Vec<DayBucket>) {
    let events: Vec<Event> = raw
        .items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|item| normalize_poi(item, opts))
        .collect();

    let buckets: Vec<DayBucket> = raw
        .days
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|day| {
            DayBucket::new(
                day.item_ids
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|id| id.to_string())
                    .collect(),
            )
        })
        .collect();

    (events, buckets)
}

/// Normalize one scraped point of interest.
///
/// Returns None only when the record carries no id; every other missing
/// field just leaves its output counterpart absent.
pub fn normalize_poi(raw: &RawPoi, opts: &NormalizeOptions) -> Option<Event> {
    let id = raw.id?.to_string();

    let title = raw.name.clone().unwrap_or_default();
    let description = raw
        .description
        .as_deref()
        .map(clean_description)
        .filter(|d| !d.is_empty());

    let place_type = raw.place_type.as_deref().unwrap_or_default();
    let desc_fragment = description.as_deref().unwrap_or_default();
    let label = classify(&[title.as_str(), desc_fragment, place_type]);

    let duration = resolve_duration(raw.duration.as_ref());

    let (rating, review_count) = match &raw.review_summary {
        Some(summary) => (summary.rating, summary.count),
        None => (None, None),
    };

    let awards = raw.awards.as_deref().unwrap_or_default();
    let top_rated = rating.is_some_and(|r| r == TOP_RATING)
        && review_count.unwrap_or(0) > TOP_RATING_MIN_REVIEWS;
    let priority = if !awards.is_empty() || top_rated {
        Priority::High
    } else {
        Priority::Unset
    };

    let price = raw.recommended_product.as_ref().and_then(|p| p.price);

    Some(Event {
        id,
        title,
        duration,
        category: label.to_string(),
        category_id: 0,
        description,
        priority,
        preferred_time: preferred_time_for(label),
        location: raw.geo.as_ref().map(|g| EventLocation {
            address: g.address.clone(),
            latitude: g.latitude,
            longitude: g.longitude,
            name: g.name.clone(),
            location_id: g.location_id,
        }),
        opening_hours: raw.weekly_hours.as_ref().and_then(weekly_hours_map),
        images: images_field(raw.photos.as_deref()),
        more_info: raw
            .url
            .as_deref()
            .map(|u| absolute_link(&opts.link_base, u)),
        price,
        currency: price.is_some().then(|| opts.currency.clone()),
        extra: EventExtra {
            rating,
            tags: raw.tags.clone().unwrap_or_default(),
            rewards: awards
                .iter()
                .filter_map(|a| a.display_name.clone())
                .collect(),
        },
        all_day: duration.minutes() >= ALL_DAY_MIN_MINUTES,
    })
}

/// Strip markup and collapse whitespace in scraped description text.
pub fn clean_description(text: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    static WS_RE: OnceLock<Regex> = OnceLock::new();
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
    let ws_re = WS_RE.get_or_init(|| Regex::new(r"\s+").unwrap());

    let stripped = tag_re.replace_all(text, " ");
    ws_re.replace_all(&stripped, " ").trim().to_string()
}

/// Duration ladder: explicit minutes, then a from/to range with a unit
/// (upper bound wins), then the one-hour fallback. Zero and negative
/// values count as absent, and values too large for a minute count read
/// as the default.
fn resolve_duration(raw: Option<&RawDuration>) -> HhMm {
    let fallback = HhMm::from_minutes(DEFAULT_DURATION_MINUTES);
    let Some(d) = raw else {
        return fallback;
    };

    if let Some(minutes) = d.minutes {
        if minutes > 0 {
            return HhMm::from_minutes(u32::try_from(minutes).unwrap_or(DEFAULT_DURATION_MINUTES));
        }
    }

    if let Some(bound) = d.to.or(d.from) {
        if bound > 0 {
            let total = bound.saturating_mul(unit_minutes(d.unit.as_deref()));
            return HhMm::from_minutes(u32::try_from(total).unwrap_or(DEFAULT_DURATION_MINUTES));
        }
    }

    fallback
}

/// Minutes per unit; unrecognized units read as hours.
fn unit_minutes(unit: Option<&str>) -> i64 {
    match unit.map(str::to_lowercase).as_deref() {
        Some("minute" | "minutes" | "min" | "mins") => 1,
        Some("day" | "days") => 1440,
        _ => 60,
    }
}

/// Weekday name to open spans, weekday names lowercased.
///
/// An upstream with no schedule at all yields None so the output has no
/// openingHours key; a present-but-empty week yields an empty map.
fn weekly_hours_map(hours: &RawWeeklyHours) -> Option<BTreeMap<String, Vec<HoursSpan>>> {
    let week = hours.week.as_deref()?;

    let mut map = BTreeMap::new();
    for day in week {
        let Some(name) = day.day.as_deref() else {
            continue;
        };
        let spans: Vec<HoursSpan> = day
            .intervals
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|iv| HoursSpan {
                start: HhMm::from_hours_minutes(
                    iv.open_hours.unwrap_or(0),
                    iv.open_minutes.unwrap_or(0),
                ),
                end: HhMm::from_hours_minutes(
                    iv.close_hours.unwrap_or(0),
                    iv.close_minutes.unwrap_or(0),
                ),
            })
            .collect();
        map.insert(name.to_lowercase(), spans);
    }
    Some(map)
}

/// Largest variant of each photo, newline-joined into one field.
fn images_field(photos: Option<&[RawPhoto]>) -> Option<String> {
    let urls: Vec<&str> = photos?
        .iter()
        .filter_map(|photo| {
            photo
                .sizes
                .as_deref()
                .unwrap_or_default()
                .iter()
                .max_by_key(|s| u64::from(s.width.unwrap_or(0)) * u64::from(s.height.unwrap_or(0)))
                .and_then(|s| s.url.as_deref())
        })
        .filter(|u| !u.is_empty())
        .collect();

    if urls.is_empty() {
        None
    } else {
        Some(urls.join("\n"))
    }
}

fn absolute_link(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use roam_core::event::PreferredTime;

    fn opts() -> NormalizeOptions {
        NormalizeOptions {
            currency: "ILS".to_string(),
            link_base: "https://travel.example.com".to_string(),
        }
    }

    fn poi_from_json(json: &str) -> RawPoi {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_full_record_normalizes() {
        let raw = poi_from_json(
            r#"{
                "id": 8841,
                "name": "Harbor Seafood Grill",
                "description": "<b>Fresh  fish</b> daily.<br/>  Harbor views.",
                "placeType": "EATERY",
                "geo": {
                    "latitude": 36.14,
                    "longitude": -5.35,
                    "address": "1 Quay St",
                    "name": "Old Harbor",
                    "locationId": 5512
                },
                "reviewSummary": { "rating": 4.5, "count": 2210 },
                "duration": { "minutes": 90 },
                "photos": [
                    { "sizes": [
                        { "width": 100, "height": 80, "url": "https://img/s.jpg" },
                        { "width": 1200, "height": 900, "url": "https://img/l.jpg" }
                    ]}
                ],
                "recommendedProduct": { "price": 120.0 },
                "tags": ["seafood"],
                "url": "/restaurant/8841"
            }"#,
        );

        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.id, "8841");
        assert_eq!(event.title, "Harbor Seafood Grill");
        assert_eq!(event.description.as_deref(), Some("Fresh fish daily. Harbor views."));
        assert_eq!(event.category, "Food");
        assert_eq!(event.duration, HhMm::from_minutes(90));
        assert_eq!(event.images.as_deref(), Some("https://img/l.jpg"));
        assert_eq!(
            event.more_info.as_deref(),
            Some("https://travel.example.com/restaurant/8841")
        );
        assert_eq!(event.price, Some(120.0));
        assert_eq!(event.currency.as_deref(), Some("ILS"));
        assert_eq!(event.extra.rating, Some(4.5));
        assert_eq!(event.extra.tags, vec!["seafood"]);
        assert_eq!(event.location.as_ref().unwrap().location_id, Some(5512));
        assert!(!event.all_day);
    }

    #[test]
    fn test_record_without_id_is_dropped() {
        let raw = poi_from_json(r#"{ "name": "Nameless Corner" }"#);
        assert!(normalize_poi(&raw, &opts()).is_none());
    }

    #[test]
    fn test_bare_record_still_normalizes() {
        let raw = poi_from_json(r#"{ "id": 7 }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.id, "7");
        assert_eq!(event.title, "");
        assert_eq!(event.category, "General");
        assert_eq!(event.duration, HhMm::from_minutes(60));
        assert!(event.description.is_none());
        assert!(event.opening_hours.is_none());
        assert!(event.images.is_none());
        assert!(event.price.is_none());
        assert!(event.currency.is_none());
    }

    #[test]
    fn test_duration_range_uses_upper_bound() {
        let raw = poi_from_json(r#"{ "id": 1, "duration": { "from": 1, "to": 2, "unit": "hours" } }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.duration, HhMm::from_minutes(120));

        // minutes beat the range when both are present
        let raw = poi_from_json(
            r#"{ "id": 1, "duration": { "minutes": 45, "from": 1, "to": 2, "unit": "hours" } }"#,
        );
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.duration, HhMm::from_minutes(45));

        // unknown unit reads as hours
        let raw = poi_from_json(r#"{ "id": 1, "duration": { "to": 3, "unit": "stunden" } }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.duration, HhMm::from_minutes(180));

        // zero minutes falls through to the range, then the default
        let raw = poi_from_json(r#"{ "id": 1, "duration": { "minutes": 0 } }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.duration, HhMm::from_minutes(60));
    }

    #[test]
    fn test_oversized_durations_fall_back() {
        let raw = poi_from_json(r#"{ "id": 1, "duration": { "minutes": 9999999999999 } }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.duration, HhMm::from_minutes(60));

        let raw = poi_from_json(
            r#"{ "id": 1, "duration": { "to": 9223372036854775807, "unit": "days" } }"#,
        );
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.duration, HhMm::from_minutes(60));
    }

    #[test]
    fn test_oversized_hour_components_degrade_not_abort() {
        // one venue with garbage opening hours must not take the trip down
        let raw = poi_from_json(
            r#"{ "id": 1, "name": "Glitch Cafe", "weeklyHours": { "week": [
                { "day": "FRIDAY", "intervals": [
                    { "openHours": 4294967295, "openMinutes": 59, "closeHours": 23, "closeMinutes": 0 }
                ]}
            ]}}"#,
        );
        let event = normalize_poi(&raw, &opts()).unwrap();
        let hours = event.opening_hours.unwrap();
        let friday = &hours["friday"];
        assert_eq!(friday[0].start.minutes(), u32::MAX);
        assert_eq!(friday[0].end.to_string(), "23:00");
    }

    #[test]
    fn test_eight_hour_visit_is_all_day() {
        let raw = poi_from_json(r#"{ "id": 1, "duration": { "minutes": 480 } }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert!(event.all_day);
    }

    #[test]
    fn test_priority_from_award_or_top_rating() {
        let raw = poi_from_json(
            r#"{ "id": 1, "awards": [ { "displayName": "Travelers Choice", "year": "2024" } ] }"#,
        );
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.priority, Priority::High);
        assert_eq!(event.extra.rewards, vec!["Travelers Choice"]);

        let raw = poi_from_json(r#"{ "id": 1, "reviewSummary": { "rating": 5.0, "count": 1001 } }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.priority, Priority::High);

        // 5.0 with too few reviews is not enough
        let raw = poi_from_json(r#"{ "id": 1, "reviewSummary": { "rating": 5.0, "count": 1000 } }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.priority, Priority::Unset);

        // neither is a 4.9 with thousands of reviews
        let raw = poi_from_json(r#"{ "id": 1, "reviewSummary": { "rating": 4.9, "count": 9000 } }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.priority, Priority::Unset);
    }

    #[test]
    fn test_place_type_alone_can_classify() {
        let raw = poi_from_json(r#"{ "id": 1, "name": "Casa Azul", "placeType": "MUSEUM" }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.category, "Museums");
        assert_eq!(event.preferred_time, PreferredTime::Unset);
    }

    #[test]
    fn test_opening_hours_absent_vs_empty() {
        let raw = poi_from_json(r#"{ "id": 1 }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert!(event.opening_hours.is_none());

        let raw = poi_from_json(r#"{ "id": 1, "weeklyHours": { "week": [] } }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(event.opening_hours, Some(BTreeMap::new()));

        let raw = poi_from_json(
            r#"{ "id": 1, "weeklyHours": { "week": [
                { "day": "MONDAY", "intervals": [
                    { "openHours": 9, "openMinutes": 30, "closeHours": 18, "closeMinutes": 0 }
                ]}
            ]}}"#,
        );
        let event = normalize_poi(&raw, &opts()).unwrap();
        let hours = event.opening_hours.unwrap();
        let monday = &hours["monday"];
        assert_eq!(monday[0].start.to_string(), "09:30");
        assert_eq!(monday[0].end.to_string(), "18:00");
    }

    #[test]
    fn test_images_pick_largest_variant_per_photo() {
        let raw = poi_from_json(
            r#"{ "id": 1, "photos": [
                { "sizes": [
                    { "width": 50, "height": 50, "url": "https://img/a-small.jpg" },
                    { "width": 800, "height": 600, "url": "https://img/a-large.jpg" }
                ]},
                { "sizes": [
                    { "width": 640, "height": 480, "url": "https://img/b.jpg" }
                ]},
                { "sizes": [] }
            ]}"#,
        );
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(
            event.images.as_deref(),
            Some("https://img/a-large.jpg\nhttps://img/b.jpg")
        );
    }

    #[test]
    fn test_absolute_links_pass_through() {
        let raw = poi_from_json(r#"{ "id": 1, "url": "https://elsewhere.example.com/x" }"#);
        let event = normalize_poi(&raw, &opts()).unwrap();
        assert_eq!(
            event.more_info.as_deref(),
            Some("https://elsewhere.example.com/x")
        );
    }

    #[test]
    fn test_trip_filters_unkeyed_items_but_keeps_day_order() {
        let raw: RawTrip = serde_json::from_str(
            r#"{
                "tripId": 31,
                "days": [
                    { "itemIds": [2, 1] },
                    { "itemIds": [3] }
                ],
                "items": [
                    { "id": 1, "name": "A" },
                    { "name": "no id" },
                    { "id": 2, "name": "B" },
                    { "id": 3, "name": "C" }
                ]
            }"#,
        )
        .unwrap();

        let (events, buckets) = normalize_trip(&raw, &opts());
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].event_ids, vec!["2", "1"]);
        assert_eq!(buckets[1].event_ids, vec!["3"]);
    }
}
