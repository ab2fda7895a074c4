//! HTTP handlers for events API

use crate::error::EventError;
use crate::models::{Event, EventQuery, EventWithTags};
use crate::repository::EventStore;
use crate::service::EventService;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::instrument;

/// Events router state
pub type EventsState<S> = Arc<EventService<S>>;

/// Create the events router
pub fn events_router<S: EventStore + 'static>() -> Router<EventsState<S>> {
    Router::new()
        .route("/", get(list_events::<S>))
        .route("/{id}", get(get_event::<S>))
}

/// List events with filtering and ordering
#[utoipa::path(
    get,
    path = "",
    params(EventQuery),
    responses(
        (status = 200, description = "Matching events", body = Vec<Event>),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 401, response = axum_helpers::errors::responses::UnauthorizedResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn list_events<S: EventStore>(
    State(state): State<EventsState<S>>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> Result<Json<Vec<Event>>, EventError> {
    let Query(query) = query.map_err(|e| EventError::InvalidQuery {
        message: e.body_text(),
    })?;
    let events = state.list(&query).await?;
    Ok(Json(events))
}

/// Get an event and its tags
#[utoipa::path(
    get,
    path = "/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventWithTags),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 401, response = axum_helpers::errors::responses::UnauthorizedResponse),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn get_event<S: EventStore>(
    State(state): State<EventsState<S>>,
    Path(id): Path<String>,
) -> Result<Json<EventWithTags>, EventError> {
    let id = id
        .trim()
        .parse::<i64>()
        .map_err(|_| EventError::InvalidId { raw: id.clone() })?;

    let event = state.get_with_tags(id).await?;
    Ok(Json(event))
}
