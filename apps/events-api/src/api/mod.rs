//! API routes module
//!
//! `/auth` and `/location` are public; `/events` requires a bearer token.

pub mod auth;
pub mod events;
pub mod health;
pub mod location;

use crate::state::AppState;
use axum::{Router, middleware};
use axum_helpers::require_token;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> eyre::Result<Router> {
    let protected = Router::new()
        .nest("/events", events::router(state)?)
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            require_token,
        ));

    Ok(Router::new()
        .nest("/auth", auth::router(state))
        .nest("/location", location::router(state)?)
        .merge(protected)
        .merge(health::router(state.clone())))
}
