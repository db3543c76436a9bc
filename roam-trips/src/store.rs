//! Persistence seam for finished itineraries.

use anyhow::Result;
use async_trait::async_trait;

use roam_core::itinerary::Itinerary;

/// A destination store for assembled itineraries.
///
/// Implementations belong to the surrounding application (a user trip
/// service, a shared trip cache); this crate only defines the capability
/// and fans finished itineraries out to every registered store.
#[async_trait]
pub trait ItineraryStore: Send + Sync {
    async fn save(&self, itinerary: &Itinerary) -> Result<()>;
}
