//! roam-trips: upstream planner client, itinerary assembly, and the
//! create-trip pipeline.

pub mod builder;
pub mod client;
pub mod locale;
pub mod request;
pub mod service;
pub mod store;

pub use builder::assemble_itinerary;
pub use client::{LocationHit, PlannerClient, TripSource, UpstreamConfig};
pub use locale::{localize, trip_name};
pub use request::{CreateTripRequest, TravelingWith};
pub use service::{TripError, TripService};
pub use store::ItineraryStore;
