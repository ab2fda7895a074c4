//! Readiness endpoint

use crate::state::AppState;
use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use domain_events::EventStore;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Ready once the events document can be read and parsed
async fn readiness_check(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "events_store",
        Box::pin(async {
            state
                .store
                .load_snapshot()
                .await
                .map(|_| ())
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}
