//! Events API routes
//!
//! Builds the events service over the JSON document, with postal-code
//! geocoding for the `cep` query point.

use crate::state::AppState;
use axum::Router;
use domain_events::EventService;
use domain_locations::ViaCepGeocoder;
use std::sync::Arc;
use tracing::info;

pub fn router(state: &AppState) -> eyre::Result<Router> {
    let geocoder = ViaCepGeocoder::from_config(&state.config.location)
        .map_err(|e| eyre::eyre!("Failed to build postal code geocoder: {}", e))?;

    let service = EventService::new(state.store.clone()).with_geocoder(Arc::new(geocoder));
    info!(path = %state.store.path().display(), "Events served from JSON document");

    Ok(domain_events::events_router().with_state(Arc::new(service)))
}
