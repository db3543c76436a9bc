//! roam-ingest: typed schema for the scraped planner payload and the
//! raw-to-event normalizer.

pub mod normalize;
pub mod types;

pub use normalize::{NormalizeOptions, clean_description, normalize_poi, normalize_trip};
pub use types::{RawDay, RawPoi, RawTrip};
