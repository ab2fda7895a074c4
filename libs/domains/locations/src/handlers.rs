use crate::directory::LocationDirectory;
use crate::error::LocationError;
use crate::models::{City, LocationQuery, LocationRequest};
use crate::service::LocationService;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    routing::post,
};
use axum_helpers::AppError;
use std::sync::Arc;
use utoipa::OpenApi;
use validator::Validate;

/// OpenAPI documentation for the location API
#[derive(OpenApi)]
#[openapi(
    paths(search_location),
    components(schemas(City, LocationRequest)),
    tags((name = "location", description = "IBGE municipality lookup"))
)]
pub struct ApiDoc;

/// Router for `/location`
pub fn router<D: LocationDirectory + 'static>(service: LocationService<D>) -> Router {
    Router::new()
        .route("/", post(search_location::<D>))
        .with_state(Arc::new(service))
}

/// Resolve a location label to matching IBGE municipalities
///
/// The label is read from `?label=` first and from a JSON body second.
#[utoipa::path(
    post,
    path = "",
    tag = "location",
    params(LocationQuery),
    request_body(content = LocationRequest, description = "Used when the query has no label", content_type = "application/json"),
    responses(
        (status = 200, description = "Matching cities, possibly empty", body = Vec<City>),
        (status = 400, response = axum_helpers::errors::responses::BadRequestResponse),
        (status = 500, response = axum_helpers::errors::responses::UpstreamErrorResponse)
    )
)]
async fn search_location<D: LocationDirectory>(
    State(service): State<Arc<LocationService<D>>>,
    query: Result<Query<LocationQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<Vec<City>>, AppError> {
    let Query(query) = query.map_err(|e| LocationError::Validation(e.body_text()))?;
    let label = match query.label.filter(|l| !l.trim().is_empty()) {
        Some(label) => label,
        None => label_from_body(&body)?,
    };

    let cities = service.search_location(&label).await?;
    Ok(Json(cities))
}

fn label_from_body(body: &[u8]) -> Result<String, LocationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(LocationError::MissingLabel);
    }

    let request: LocationRequest = serde_json::from_slice(body)
        .map_err(|e| LocationError::Validation(format!("Invalid JSON body: {}", e)))?;
    request.validate()?;

    request
        .label
        .filter(|l| !l.trim().is_empty())
        .ok_or(LocationError::MissingLabel)
}
