//! Location lookup routes backed by the IBGE directory

use crate::state::AppState;
use axum::Router;
use domain_locations::{IbgeDirectory, LocationService};

pub fn router(state: &AppState) -> eyre::Result<Router> {
    let directory = IbgeDirectory::from_config(&state.config.location)
        .map_err(|e| eyre::eyre!("Failed to build IBGE client: {}", e))?;

    Ok(domain_locations::router(LocationService::new(directory)))
}
