//! Trip service: destination text in, persisted itinerary out.

use std::sync::Arc;

use futures_util::future::join_all;
use log::{debug, info, warn};
use thiserror::Error;

use roam_core::itinerary::Itinerary;
use roam_core::schedule::{GapSource, RandomGaps};

use crate::builder::assemble_itinerary;
use crate::client::TripSource;
use crate::request::CreateTripRequest;
use crate::store::ItineraryStore;

/// Failures of the create-trip pipeline. Everything here is terminal for
/// the current request; nothing is retried.
#[derive(Debug, Error)]
pub enum TripError {
    /// The upstream typeahead had nothing for the requested destination.
    #[error("no destination found matching \"{0}\"")]
    DestinationNotFound(String),
    /// The upstream accepted the request but produced no trip.
    #[error("the upstream planner could not create a trip for \"{0}\"")]
    TripCreationFailed(String),
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

/// Orchestrates lookup, creation, fetch, assembly and persistence.
///
/// Each upstream call's result is a precondition for the next, so the
/// pipeline runs sequentially; only the final store fan-out is concurrent.
pub struct TripService<S: TripSource> {
    source: S,
    link_base: String,
    stores: Vec<Arc<dyn ItineraryStore>>,
}

impl<S: TripSource> TripService<S> {
    /// `link_base` is the site base used to absolutize venue detail links.
    pub fn new(source: S, link_base: impl Into<String>) -> Self {
        Self {
            source,
            link_base: link_base.into(),
            stores: Vec::new(),
        }
    }

    /// Register a store; every finished itinerary is saved to all of them.
    pub fn with_store(mut self, store: Arc<dyn ItineraryStore>) -> Self {
        self.stores.push(store);
        self
    }

    /// Run the full pipeline with thread-RNG gaps.
    pub async fn create_trip(&self, request: &CreateTripRequest) -> Result<Itinerary, TripError> {
        let mut gaps = RandomGaps;
        self.create_trip_with_gaps(request, &mut gaps).await
    }

    /// Same pipeline with an injected gap source.
    pub async fn create_trip_with_gaps(
        &self,
        request: &CreateTripRequest,
        gaps: &mut dyn GapSource,
    ) -> Result<Itinerary, TripError> {
        let location = self
            .source
            .lookup_location(&request.destination)
            .await?
            .ok_or_else(|| TripError::DestinationNotFound(request.destination.clone()))?;
        info!(
            "resolved '{}' to upstream location {} ({})",
            request.destination, location.location_id, location.name
        );

        let trip_id = self
            .source
            .create_trip(&location, request)
            .await?
            .ok_or_else(|| TripError::TripCreationFailed(request.destination.clone()))?;
        info!("upstream generated trip {trip_id}");

        let raw = self.source.fetch_trip(trip_id).await?;
        let raw_item_count = raw.items.as_deref().unwrap_or_default().len();
        if raw_item_count == 0 {
            warn!("trip {trip_id} came back without items");
        }

        let itinerary = assemble_itinerary(&raw, request, &location.name, &self.link_base, gaps);
        let dropped = raw_item_count.saturating_sub(itinerary.all_events.len());
        if dropped > 0 {
            debug!("trip {trip_id}: dropped {dropped} item(s) without an id");
        }
        info!(
            "assembled '{}': {} on the calendar, {} in the sidebar",
            itinerary.name,
            itinerary.calendar_events.len(),
            itinerary.sidebar_events.len()
        );

        self.persist(&itinerary).await?;
        Ok(itinerary)
    }

    async fn persist(&self, itinerary: &Itinerary) -> Result<(), TripError> {
        if self.stores.is_empty() {
            debug!("no stores registered, skipping persistence");
            return Ok(());
        }

        let saves = self.stores.iter().map(|store| store.save(itinerary));
        for result in join_all(saves).await {
            result?;
        }
        info!(
            "saved '{}' to {} store(s)",
            itinerary.name,
            self.stores.len()
        );
        Ok(())
    }
}
