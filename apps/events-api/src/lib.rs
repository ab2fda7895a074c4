//! Events catalogue HTTP API.
//!
//! Exchanges an API key for a bearer token, serves filtered and sorted
//! event listings from a JSON document, and resolves location labels
//! against the IBGE directory.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::server::health_router;

pub use config::Config;
pub use state::AppState;

/// Full application router: API under `/api`, docs, `/health`.
pub async fn build_app(state: &AppState) -> eyre::Result<Router> {
    let api_routes = api::routes(state)?;
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    Ok(router.merge(health_router(state.config.app)))
}
