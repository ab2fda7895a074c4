//! In-memory query engine over the event catalogue.
//!
//! Filters run in a fixed order (type, date, time, search, proximity) and
//! each only sees what the previous one kept. Sorting is stable, so ties
//! keep their catalogue order.

use crate::error::{EventError, Result};
use crate::geo::distance_km;
use crate::models::{Event, FilterCriteria, SortStrategy, Tag};
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::str::FromStr;

/// Lowercased tag names per event id
struct TagIndex {
    by_event: HashMap<i64, Vec<String>>,
}

impl TagIndex {
    fn build(tags: &[Tag]) -> Self {
        let mut by_event: HashMap<i64, Vec<String>> = HashMap::new();
        for tag in tags {
            by_event
                .entry(tag.event_id)
                .or_default()
                .push(tag.name.to_lowercase());
        }
        Self { by_event }
    }

    fn any_contains(&self, event_id: i64, needle: &str) -> bool {
        self.by_event
            .get(&event_id)
            .is_some_and(|names| names.iter().any(|n| n.contains(needle)))
    }
}

/// Parse the raw `classificacao` value.
pub fn parse_sort(raw: &str) -> Result<SortStrategy> {
    SortStrategy::from_str(raw).map_err(|_| EventError::InvalidSortStrategy {
        value: raw.to_string(),
    })
}

/// Filter then sort `events` according to `criteria`.
///
/// Inputs are not modified. An unknown sort strategy fails before any
/// filtering, so callers never see a partial result.
pub fn query_events(events: &[Event], tags: &[Tag], criteria: &FilterCriteria) -> Result<Vec<Event>> {
    let sort = criteria.sort_by.as_deref().map(parse_sort).transpose()?;

    let needle = criteria.search.as_deref().map(str::to_lowercase);
    let tag_index = needle.as_ref().map(|_| TagIndex::build(tags));

    let proximity = match (criteria.max_distance, criteria.origin()) {
        (Some(max), Some(origin)) => Some((max, origin)),
        _ => None,
    };

    let mut matched: Vec<Event> = events
        .iter()
        .filter(|e| matches_exact(&criteria.event_type, &e.event_type))
        .filter(|e| matches_exact(&criteria.date, &e.date))
        .filter(|e| matches_exact(&criteria.time, &e.time))
        .filter(|e| match (&needle, &tag_index) {
            (Some(needle), Some(index)) => matches_search(e, needle, index),
            _ => true,
        })
        .filter(|e| match proximity {
            Some((max, origin)) => distance_from(origin, e) <= max,
            None => true,
        })
        .cloned()
        .collect();

    if let Some(sort) = sort {
        sort_events(&mut matched, sort, criteria.origin());
    }

    Ok(matched)
}

fn matches_exact(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted {
        Some(wanted) => actual.as_deref() == Some(wanted.as_str()),
        None => true,
    }
}

fn matches_search(event: &Event, needle: &str, tags: &TagIndex) -> bool {
    event.name.to_lowercase().contains(needle)
        || event.description.to_lowercase().contains(needle)
        || tags.any_contains(event.id, needle)
}

/// Events without coordinates are treated as sitting on the query point.
fn distance_from((lat, lon): (f64, f64), event: &Event) -> f64 {
    match (event.lat, event.lon) {
        (Some(event_lat), Some(event_lon)) => distance_km(lat, lon, event_lat, event_lon),
        _ => 0.0,
    }
}

fn sort_events(events: &mut Vec<Event>, sort: SortStrategy, origin: Option<(f64, f64)>) {
    match sort {
        SortStrategy::Distance => {
            let Some(origin) = origin else {
                return;
            };
            let mut keyed: Vec<(f64, Event)> = events
                .drain(..)
                .map(|e| (distance_from(origin, &e), e))
                .collect();
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            events.extend(keyed.into_iter().map(|(_, e)| e));
        }
        SortStrategy::Relevance => {
            events.sort_by_key(|e| !e.recent.unwrap_or(false));
        }
        SortStrategy::Recent => {
            // Unparsable or missing dates sort last.
            let mut keyed: Vec<(Reverse<Option<NaiveDate>>, Event)> = events
                .drain(..)
                .map(|e| (Reverse(parse_date(&e)), e))
                .collect();
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
            events.extend(keyed.into_iter().map(|(_, e)| e));
        }
    }
}

fn parse_date(event: &Event) -> Option<NaiveDate> {
    event
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::EARTH_RADIUS_KM;
    use std::f64::consts::PI;

    fn ids(events: &[Event]) -> Vec<i64> {
        events.iter().map(|e| e.id).collect()
    }

    fn catalogue() -> (Vec<Event>, Vec<Tag>) {
        let events = vec![
            Event::new(1, "Rock Festival")
                .with_description("Bandas ao vivo")
                .with_type("show")
                .on("2024-10-10", "20:00")
                .at(-23.55, -46.63)
                .flagged_recent(false),
            Event::new(2, "Hamlet")
                .with_description("Teatro clássico")
                .with_type("teatro")
                .on("2024-11-01", "19:00")
                .at(-22.90, -43.17)
                .flagged_recent(true),
            Event::new(3, "Jazz na Praça")
                .with_description("Música instrumental")
                .with_type("show")
                .on("2024-10-10", "18:00")
                .at(-23.56, -46.65),
        ];
        let tags = vec![Tag::new(1, 3, "Ao ar livre"), Tag::new(2, 2, "Drama")];
        (events, tags)
    }

    #[test]
    fn test_no_criteria_returns_catalogue_in_order() {
        let (events, tags) = catalogue();
        let result = query_events(&events, &tags, &FilterCriteria::default()).unwrap();
        assert_eq!(result, events);
    }

    #[test]
    fn test_type_filter() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            event_type: Some("show".to_string()),
            ..Default::default()
        };

        let result = query_events(&events, &tags, &criteria).unwrap();
        assert_eq!(ids(&result), vec![1, 3]);
        assert!(result.iter().all(|e| e.event_type.as_deref() == Some("show")));
    }

    #[test]
    fn test_type_filter_is_exact() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            event_type: Some("Show".to_string()),
            ..Default::default()
        };
        assert!(query_events(&events, &tags, &criteria).unwrap().is_empty());
    }

    #[test]
    fn test_date_and_time_filters_combine() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            date: Some("2024-10-10".to_string()),
            time: Some("18:00".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &tags, &criteria).unwrap()), vec![3]);
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            search: Some("ROCK".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &tags, &criteria).unwrap()), vec![1]);
    }

    #[test]
    fn test_search_matches_description() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            search: Some("instrumental".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &tags, &criteria).unwrap()), vec![3]);
    }

    #[test]
    fn test_search_matches_tag_only() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            search: Some("drama".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &tags, &criteria).unwrap()), vec![2]);
    }

    #[test]
    fn test_tag_for_unknown_event_is_ignored() {
        let (events, mut tags) = catalogue();
        tags.push(Tag::new(9, 999, "rock"));
        let criteria = FilterCriteria {
            search: Some("rock".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &tags, &criteria).unwrap()), vec![1]);
    }

    #[test]
    fn test_proximity_keeps_events_within_radius() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            lat: Some(-23.55),
            lon: Some(-46.63),
            max_distance: Some(5.0),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &tags, &criteria).unwrap()), vec![1, 3]);
    }

    #[test]
    fn test_proximity_excludes_just_outside_radius() {
        let km_per_degree = EARTH_RADIUS_KM * PI / 180.0;
        let events = vec![Event::new(1, "Far").at(101.0 / km_per_degree, 0.0)];
        let criteria = FilterCriteria {
            lat: Some(0.0),
            lon: Some(0.0),
            max_distance: Some(100.0),
            ..Default::default()
        };
        assert!(query_events(&events, &[], &criteria).unwrap().is_empty());
    }

    #[test]
    fn test_proximity_needs_coordinates() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            lat: Some(-23.55),
            max_distance: Some(1.0),
            ..Default::default()
        };
        assert_eq!(query_events(&events, &tags, &criteria).unwrap().len(), 3);
    }

    #[test]
    fn test_event_without_coordinates_counts_as_distance_zero() {
        let events = vec![Event::new(1, "Online")];
        let criteria = FilterCriteria {
            lat: Some(-23.55),
            lon: Some(-46.63),
            max_distance: Some(0.5),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &[], &criteria).unwrap()), vec![1]);
    }

    #[test]
    fn test_sort_by_distance() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            lat: Some(-22.90),
            lon: Some(-43.17),
            sort_by: Some("distance".to_string()),
            ..Default::default()
        };
        let result = query_events(&events, &tags, &criteria).unwrap();
        assert_eq!(result[0].id, 2);
        assert_eq!(result.len(), 3);

        let distances: Vec<f64> = result
            .iter()
            .map(|e| distance_from((-22.90, -43.17), e))
            .collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_sort_by_distance_puts_events_without_coordinates_first() {
        let events = vec![
            Event::new(1, "Far").at(-22.90, -43.17),
            Event::new(2, "Online"),
            Event::new(3, "Near").at(-23.56, -46.65),
            Event::new(4, "Half placed").with_type("online"),
        ];
        let criteria = FilterCriteria {
            lat: Some(-23.55),
            lon: Some(-46.63),
            sort_by: Some("distance".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &[], &criteria).unwrap()), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_zero_radius_keeps_event_on_query_point() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            lat: Some(-23.55),
            lon: Some(-46.63),
            max_distance: Some(0.0),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &tags, &criteria).unwrap()), vec![1]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            event_type: Some("show".to_string()),
            search: Some("a".to_string()),
            lat: Some(-23.56),
            lon: Some(-46.65),
            max_distance: Some(10.0),
            sort_by: Some("distance".to_string()),
            ..Default::default()
        };

        let once = query_events(&events, &tags, &criteria).unwrap();
        let twice = query_events(&once, &tags, &criteria).unwrap();
        assert!(!once.is_empty());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_by_distance_without_origin_keeps_order() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            sort_by: Some("distance".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &tags, &criteria).unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_by_relevance_is_stable() {
        let events = vec![
            Event::new(1, "a").flagged_recent(false),
            Event::new(2, "b").flagged_recent(true),
            Event::new(3, "c"),
            Event::new(4, "d").flagged_recent(true),
        ];
        let criteria = FilterCriteria {
            sort_by: Some("relevance".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &[], &criteria).unwrap()), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_by_recent() {
        let events = vec![
            Event::new(1, "old").on("2023-01-01", "10:00"),
            Event::new(2, "undated"),
            Event::new(3, "new").on("2024-12-31", "10:00"),
            Event::new(4, "same day").on("2024-12-31", "09:00"),
            Event::new(5, "garbage").on("31/12/2024", "10:00"),
        ];
        let criteria = FilterCriteria {
            sort_by: Some("recent".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &[], &criteria).unwrap()), vec![3, 4, 1, 2, 5]);
    }

    #[test]
    fn test_unknown_sort_fails() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            sort_by: Some("bogus".to_string()),
            ..Default::default()
        };
        let err = query_events(&events, &tags, &criteria).unwrap_err();
        assert!(matches!(err, EventError::InvalidSortStrategy { value } if value == "bogus"));
    }

    #[test]
    fn test_unknown_sort_fails_even_with_no_matches() {
        let criteria = FilterCriteria {
            event_type: Some("nothing".to_string()),
            sort_by: Some("Distance".to_string()),
            ..Default::default()
        };
        assert!(query_events(&[], &[], &criteria).is_err());
    }

    #[test]
    fn test_filters_and_sort_compose() {
        let (events, tags) = catalogue();
        let criteria = FilterCriteria {
            event_type: Some("show".to_string()),
            lat: Some(-23.56),
            lon: Some(-46.65),
            max_distance: Some(10.0),
            sort_by: Some("distance".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&query_events(&events, &tags, &criteria).unwrap()), vec![3, 1]);
    }

    #[test]
    fn test_inputs_are_untouched() {
        let (events, tags) = catalogue();
        let before = events.clone();
        let criteria = FilterCriteria {
            search: Some("o".to_string()),
            sort_by: Some("relevance".to_string()),
            ..Default::default()
        };
        query_events(&events, &tags, &criteria).unwrap();
        assert_eq!(events, before);
    }
}
