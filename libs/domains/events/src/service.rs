//! Event service layer

use crate::error::{EventError, Result};
use crate::models::{Event, EventQuery, EventWithTags};
use crate::query::{parse_sort, query_events};
use crate::repository::EventStore;
use domain_locations::PostalCodeGeocoder;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Answers catalogue queries from fresh store snapshots
pub struct EventService<S: EventStore> {
    store: S,
    geocoder: Option<Arc<dyn PostalCodeGeocoder>>,
}

impl<S: EventStore> EventService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            geocoder: None,
        }
    }

    /// Resolve `cep` to a query point when no coordinates are given
    pub fn with_geocoder(mut self, geocoder: Arc<dyn PostalCodeGeocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Filter and sort the catalogue
    #[instrument(skip(self))]
    pub async fn list(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let mut criteria = query.criteria();

        // Reject a bad ordering before doing any I/O
        if let Some(raw) = criteria.sort_by.as_deref() {
            parse_sort(raw)?;
        }

        if criteria.origin().is_none() {
            if let (Some(cep), Some(geocoder)) = (query.postal_code(), &self.geocoder) {
                let point = geocoder.coordinates_for(&cep).await?;
                debug!(%cep, lat = point.lat, lon = point.lon, "Query point from postal code");
                criteria.lat = Some(point.lat);
                criteria.lon = Some(point.lon);
            }
        }

        let snapshot = self.store.load_snapshot().await?;
        let events = query_events(&snapshot.events, &snapshot.tags, &criteria)?;

        info!(
            total = snapshot.events.len(),
            matched = events.len(),
            "Events queried"
        );
        Ok(events)
    }

    /// Event by id together with its tags
    #[instrument(skip(self))]
    pub async fn get_with_tags(&self, id: i64) -> Result<EventWithTags> {
        let snapshot = self.store.load_snapshot().await?;

        let event = snapshot
            .find_event(id)
            .cloned()
            .ok_or(EventError::NotFound { id })?;
        let tags = snapshot.tags_for_event(id);

        Ok(EventWithTags { event, tags })
    }

    /// Readiness: the store can be read and decoded
    pub async fn check_store(&self) -> Result<()> {
        self.store.load_snapshot().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;
    use crate::repository::Snapshot;
    use crate::repository::mock::MockEventStore;
    use async_trait::async_trait;
    use domain_locations::{Coordinates, LocationError, LocationResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every postal code with the same point, or fails
    struct FixedGeocoder {
        point: Option<Coordinates>,
        calls: AtomicUsize,
    }

    impl FixedGeocoder {
        fn at(lat: f64, lon: f64) -> Arc<Self> {
            Arc::new(Self {
                point: Some(Coordinates { lat, lon }),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                point: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PostalCodeGeocoder for FixedGeocoder {
        async fn coordinates_for(&self, postal_code: &str) -> LocationResult<Coordinates> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.point
                .ok_or_else(|| LocationError::PostalCodeNotFound(postal_code.to_string()))
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                Event::new(1, "Rock").with_type("show").at(-23.55, -46.63),
                Event::new(2, "Hamlet").with_type("teatro").at(-22.90, -43.17),
            ],
            vec![Tag::new(1, 1, "musica"), Tag::new(2, 2, "drama"), Tag::new(3, 1, "noite")],
        )
    }

    fn store() -> MockEventStore {
        let mut store = MockEventStore::new();
        store.expect_load_snapshot().returning(|| Ok(snapshot()));
        store
    }

    #[tokio::test]
    async fn test_list_applies_criteria() {
        let service = EventService::new(store());
        let query = EventQuery {
            tipo: Some("teatro".to_string()),
            ..Default::default()
        };

        let events = service.list(&query).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, 2);
    }

    #[tokio::test]
    async fn test_invalid_sort_skips_store() {
        let mut store = MockEventStore::new();
        store.expect_load_snapshot().never();

        let service = EventService::new(store);
        let query = EventQuery {
            classificacao: Some("bogus".to_string()),
            ..Default::default()
        };

        let err = service.list(&query).await.unwrap_err();
        assert!(matches!(err, EventError::InvalidSortStrategy { .. }));
    }

    #[tokio::test]
    async fn test_get_with_tags() {
        let service = EventService::new(store());
        let detail = service.get_with_tags(1).await.unwrap();

        assert_eq!(detail.event.name, "Rock");
        let names: Vec<_> = detail.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["musica", "noite"]);
    }

    #[tokio::test]
    async fn test_get_unknown_event() {
        let service = EventService::new(store());
        let err = service.get_with_tags(999).await.unwrap_err();
        assert!(matches!(err, EventError::NotFound { id: 999 }));
    }

    #[tokio::test]
    async fn test_postal_code_sets_query_point() {
        let geocoder = FixedGeocoder::at(-23.55, -46.63);
        let service = EventService::new(store()).with_geocoder(geocoder.clone());
        let query = EventQuery {
            cep: Some("01310-100".to_string()),
            max_distance: Some("10".to_string()),
            ..Default::default()
        };

        let events = service.list(&query).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, 1);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_coordinates_win_over_postal_code() {
        let geocoder = FixedGeocoder::at(-23.55, -46.63);
        let service = EventService::new(store()).with_geocoder(geocoder.clone());
        let query = EventQuery {
            cep: Some("01310-100".to_string()),
            lat: Some("-22.90".to_string()),
            lon: Some("-43.17".to_string()),
            max_distance: Some("10".to_string()),
            ..Default::default()
        };

        let events = service.list(&query).await.unwrap();
        assert_eq!(events[0].id, 2);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_geocoding_failure_propagates() {
        let service = EventService::new(store()).with_geocoder(FixedGeocoder::failing());
        let query = EventQuery {
            cep: Some("00000-000".to_string()),
            ..Default::default()
        };

        let err = service.list(&query).await.unwrap_err();
        assert!(matches!(err, EventError::Location(_)));
    }
}
