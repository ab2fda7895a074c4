//! Events Domain
//!
//! Read-only catalogue of events and their tags, loaded from a JSON
//! document, with an in-memory query engine:
//!
//! ```text
//! GET /events ──► EventService ──► EventStore (fresh snapshot)
//!                     │
//!                     └──► query_events: type → date → time → search → proximity → sort
//! ```
//!
//! When a postal code is given instead of coordinates the service asks a
//! [`domain_locations::PostalCodeGeocoder`] for the query point.

use utoipa::OpenApi;

mod error;
pub mod geo;
mod handlers;
mod models;
pub mod query;
mod repository;
mod service;

pub use error::{EventError, Result};
pub use handlers::{EventsState, events_router};
pub use models::{Event, EventQuery, EventWithTags, FilterCriteria, SortStrategy, Tag};
pub use query::query_events;
pub use repository::{EventStore, InMemoryEventStore, JsonFileEventStore, Snapshot, StoreConfig};
pub use service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_events, handlers::get_event),
    components(schemas(Event, EventWithTags, Tag, SortStrategy)),
    tags(
        (name = "events", description = "Event catalogue search")
    )
)]
pub struct ApiDoc;
