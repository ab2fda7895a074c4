//! Handler tests for the events domain
//!
//! These exercise only the events router, without auth or the `/api` prefix.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> axum::Router {
    let snapshot = Snapshot::new(
        vec![
            Event::new(1, "Rock Festival")
                .with_description("Bandas ao vivo")
                .with_type("show")
                .on("2024-10-10", "20:00")
                .at(-23.55, -46.63),
            Event::new(2, "Hamlet")
                .with_description("Teatro clássico")
                .with_type("teatro")
                .on("2024-11-01", "19:00")
                .at(-22.90, -43.17)
                .flagged_recent(true),
            Event::new(3, "Jazz na Praça")
                .with_type("show")
                .on("2024-09-01", "18:00")
                .at(-23.56, -46.65),
        ],
        vec![Tag::new(1, 1, "musica"), Tag::new(2, 1, "noite")],
    );

    let service = EventService::new(InMemoryEventStore::new(snapshot));
    events_router::<InMemoryEventStore>().with_state(Arc::new(service))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn ids(events: &[Value]) -> Vec<i64> {
    events.iter().map(|e| e["id"].as_i64().unwrap()).collect()
}

#[tokio::test]
async fn test_list_all_events() {
    let response = app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let events: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(ids(&events), vec![1, 2, 3]);
    assert_eq!(events[0]["nome"], "Rock Festival");
    assert_eq!(events[0]["tipo"], "show");
}

#[tokio::test]
async fn test_list_filters_by_type() {
    let response = app().oneshot(get("/?tipo=show")).await.unwrap();

    let events: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(ids(&events), vec![1, 3]);
}

#[tokio::test]
async fn test_list_proximity_and_distance_sort() {
    let response = app()
        .oneshot(get(
            "/?lat=-23.56&lon=-46.65&maxDistance=5&classificacao=distance",
        ))
        .await
        .unwrap();

    let events: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(ids(&events), vec![3, 1]);
}

#[tokio::test]
async fn test_list_search_matches_tags() {
    let response = app().oneshot(get("/?search=NOITE")).await.unwrap();

    let events: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(ids(&events), vec![1]);
}

#[tokio::test]
async fn test_list_sorted_by_recent() {
    let response = app().oneshot(get("/?classificacao=recent")).await.unwrap();

    let events: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(ids(&events), vec![2, 1, 3]);
}

#[tokio::test]
async fn test_list_ignores_malformed_numbers() {
    let response = app()
        .oneshot(get("/?lat=abc&lon=-46.65&maxDistance=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let events: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(events.len(), 3);
}

#[tokio::test]
async fn test_list_unknown_sort_is_400() {
    let response = app().oneshot(get("/?classificacao=bogus")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");
    assert_eq!(body["message"], "Invalid sort strategy: bogus");
}

#[tokio::test]
async fn test_list_repeated_key_is_json_400() {
    let response = app().oneshot(get("/?tipo=show&tipo=teatro")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().starts_with("Invalid query"));
}

#[tokio::test]
async fn test_get_event_includes_tags() {
    let response = app().oneshot(get("/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let event: Value = json_body(response.into_body()).await;
    assert_eq!(event["id"], 1);
    assert_eq!(event["tags"].as_array().unwrap().len(), 2);
    assert_eq!(event["tags"][0]["eventId"], 1);
}

#[tokio::test]
async fn test_get_event_without_tags() {
    let response = app().oneshot(get("/3")).await.unwrap();

    let event: Value = json_body(response.into_body()).await;
    assert_eq!(event["tags"], serde_json::json!([]));
}

#[tokio::test]
async fn test_get_unknown_event_is_404() {
    let response = app().oneshot(get("/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Event not found");
}

#[tokio::test]
async fn test_get_non_numeric_id_is_400() {
    let response = app().oneshot(get("/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
