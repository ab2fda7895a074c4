//! API key exchange

use crate::state::AppState;
use axum::{Json, Router, extract::State, http::HeaderMap, routing::post};
use axum_helpers::{AppError, TokenAuth};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::{OpenApi, ToSchema};

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(OpenApi)]
#[openapi(
    paths(authenticate),
    components(schemas(TokenResponse)),
    tags((name = "auth", description = "API key exchange"))
)]
pub struct ApiDoc;

/// Issued access token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    /// Seconds until the token expires
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

pub fn router(state: &AppState) -> Router {
    Router::new()
        .route("/", post(authenticate))
        .with_state(state.auth.clone())
}

/// Exchange the pre-shared API key for an access token
#[utoipa::path(
    post,
    path = "",
    params(
        ("x-api-key" = String, Header, description = "Pre-shared API key")
    ),
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, response = axum_helpers::errors::responses::UnauthorizedResponse),
        (status = 500, response = axum_helpers::errors::responses::InternalServerErrorResponse)
    ),
    tag = "auth"
)]
async fn authenticate(
    State(auth): State<TokenAuth>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !auth.api_key_matches(presented) {
        warn!("Rejected API key exchange");
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    let token = auth
        .issue_token()
        .map_err(|e| AppError::InternalServerError(format!("Failed to issue token: {}", e)))?;

    info!("Access token issued");
    Ok(Json(TokenResponse {
        token,
        expires_in: auth.ttl_seconds(),
    }))
}
