//! Day scheduler: lay each day's events onto the calendar with randomized
//! but bounded gaps.
//!
//! The window is 10:00-23:00, identical every day. Events keep their bucket
//! order. Leftover daily time is spread as random 30-180 minute gaps, each
//! capped at the day's slack divided by the events still unplaced so one
//! early draw cannot crowd out the rest of the day. There is no
//! backtracking: an unlucky sequence of draws leaves the day uneven, and a
//! day whose events overflow the window simply runs past 23:00 with zero
//! gaps.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::event::Event;
use crate::itinerary::CalendarEvent;
use crate::time::{ceil_minutes_to_quarter, ceil_to_quarter_hour, round_to_quarter_hour};

/// Daily scheduling window.
pub const DAY_START_HOUR: u32 = 10;
pub const DAY_END_HOUR: u32 = 23;

/// Bounds for one random inter-event gap, in minutes.
pub const MIN_GAP_MINUTES: i64 = 30;
pub const MAX_GAP_MINUTES: i64 = 180;

/// One day's event ids in visiting order. The order is authoritative: the
/// scheduler never reorders within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DayBucket {
    pub event_ids: Vec<String>,
}

impl DayBucket {
    pub fn new(event_ids: Vec<String>) -> Self {
        Self { event_ids }
    }
}

/// Source of gap durations between consecutive events.
///
/// Production draws from the thread RNG; tests inject scripted sequences to
/// pin placements exactly. One value is drawn after every placed event that
/// has a successor, whether or not the day has slack left, so a scripted
/// sequence stays aligned with event positions.
pub trait GapSource {
    /// Draw one gap in `MIN_GAP_MINUTES..=MAX_GAP_MINUTES`.
    fn draw_gap(&mut self) -> i64;
}

/// Unseeded thread-RNG gaps. Run-to-run reproducibility is a non-goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGaps;

impl GapSource for RandomGaps {
    fn draw_gap(&mut self) -> i64 {
        rand::thread_rng().gen_range(MIN_GAP_MINUTES..=MAX_GAP_MINUTES)
    }
}

/// Outcome of scheduling one trip.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schedule {
    /// Placed events, day by day in bucket order.
    pub calendar_events: Vec<CalendarEvent>,
    /// Events never referenced by any bucket.
    pub sidebar_events: Vec<Event>,
}

/// Schedule every bucket against the trip start date.
///
/// Bucket index n lands on `trip_start + n` days. Ids that resolve to no
/// known event are skipped silently. Every start sits on a 15-minute
/// boundary and never precedes the previous event's end.
pub fn schedule_days(
    buckets: &[DayBucket],
    events: &[Event],
    trip_start: NaiveDate,
    gaps: &mut dyn GapSource,
) -> Schedule {
    let by_id: HashMap<&str, &Event> = events.iter().map(|e| (e.id.as_str(), e)).collect();
    let window_minutes = i64::from((DAY_END_HOUR - DAY_START_HOUR) * 60);

    let mut placed_ids: HashSet<&str> = HashSet::new();
    let mut calendar_events = Vec::new();

    for (day_index, bucket) in buckets.iter().enumerate() {
        let date = trip_start + Duration::days(day_index as i64);
        let day_events: Vec<&Event> = bucket
            .event_ids
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).copied())
            .collect();
        if day_events.is_empty() {
            continue;
        }

        let total_minutes: i64 = day_events
            .iter()
            .map(|e| i64::from(e.duration.minutes()))
            .sum();
        // fixed for the whole day; may go negative on an overbooked one
        let available_gap = window_minutes - total_minutes;

        let mut cursor: NaiveDateTime = date.and_hms_opt(DAY_START_HOUR, 0, 0).unwrap();
        let mut prev_end: Option<NaiveDateTime> = None;

        for (i, event) in day_events.iter().enumerate() {
            let mut start = round_to_quarter_hour(cursor);
            if let Some(prev) = prev_end {
                if start < prev {
                    // rounding down would overlap the previous event
                    start = ceil_to_quarter_hour(cursor);
                }
            }
            let end = start + Duration::minutes(i64::from(event.duration.minutes()));

            calendar_events.push(CalendarEvent {
                event: (*event).clone(),
                start,
                end,
            });
            placed_ids.insert(event.id.as_str());

            let remaining = day_events.len() - i - 1;
            if remaining > 0 {
                let draw = gaps.draw_gap() as f64;
                let allowance = available_gap as f64 / remaining as f64;
                let gap = ceil_minutes_to_quarter(draw.min(allowance)).max(0);
                cursor = end + Duration::minutes(gap);
                prev_end = Some(end);
            }
        }
    }

    let sidebar_events = events
        .iter()
        .filter(|e| !placed_ids.contains(e.id.as_str()))
        .cloned()
        .collect();

    Schedule {
        calendar_events,
        sidebar_events,
    }
}
