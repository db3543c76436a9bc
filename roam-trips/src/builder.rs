//! Itinerary assembly: normalize, categorize, schedule and package one
//! scraped trip. Pure except for the injected gap source; no IO here.

use chrono::Duration;

use roam_core::category::assign_categories;
use roam_core::itinerary::{DateRange, Itinerary};
use roam_core::schedule::{GapSource, schedule_days};
use roam_ingest::normalize::{NormalizeOptions, normalize_trip};
use roam_ingest::types::RawTrip;

use crate::locale::{localize, trip_name};
use crate::request::CreateTripRequest;

/// Assemble the itinerary aggregate for one scraped trip.
///
/// Order matters: ids are assigned against the classifier's labels before
/// category titles are localized, so the label set and the translation
/// table never have to agree.
pub fn assemble_itinerary(
    raw: &RawTrip,
    request: &CreateTripRequest,
    destination_name: &str,
    link_base: &str,
    gaps: &mut dyn GapSource,
) -> Itinerary {
    let opts = NormalizeOptions {
        currency: request.currency.clone(),
        link_base: link_base.to_string(),
    };
    let (mut events, buckets) = normalize_trip(raw, &opts);

    let (mut categories, ids) = assign_categories(&events);
    for (event, id) in events.iter_mut().zip(ids) {
        event.category_id = id;
    }
    for category in &mut categories {
        category.title = localize(&request.calendar_locale, &category.title);
    }

    let schedule = schedule_days(&buckets, &events, request.date_range.start, gaps);

    let start = request.date_range.start;
    let end = start + Duration::days(i64::from(request.number_of_days.saturating_sub(1)));

    Itinerary {
        name: trip_name(
            &request.calendar_locale,
            destination_name,
            request.number_of_days,
            request.traveling_with,
        ),
        num_of_days: request.number_of_days,
        categories,
        all_events: events,
        sidebar_events: schedule.sidebar_events,
        calendar_events: schedule.calendar_events,
        date_range: DateRange {
            start,
            end: Some(end),
        },
        calendar_locale: request.calendar_locale.clone(),
        destinations: vec![destination_name.to_string()],
    }
}
