//! roam-core: Core types and scheduling for the roam itinerary builder

pub mod category;
pub mod classify;
pub mod event;
pub mod itinerary;
pub mod schedule;
pub mod time;

pub use category::{Category, assign_categories, default_categories, icon_for};
pub use classify::{classify, labels, preferred_time_for};
pub use event::{
    ALL_DAY_MIN_MINUTES, DEFAULT_DURATION_MINUTES, Event, EventExtra, EventLocation, HoursSpan,
    PreferredTime, Priority,
};
pub use itinerary::{CalendarEvent, DateRange, Itinerary};
pub use schedule::{
    DAY_END_HOUR, DAY_START_HOUR, DayBucket, GapSource, MAX_GAP_MINUTES, MIN_GAP_MINUTES,
    RandomGaps, Schedule, schedule_days,
};
pub use time::{HhMm, ceil_minutes_to_quarter, ceil_to_quarter_hour, round_to_quarter_hour};
