pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Every error leaves the API in this shape:
/// - `code`: integer error code for logs (e.g. 1004)
/// - `error`: machine-readable identifier (e.g. "NOT_FOUND")
/// - `message`: human-readable message
/// - `details`: optional structured details (e.g. validation errors)
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Event not found"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::ValidationError(e) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), error = ?e, "Validation error");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    serde_json::to_value(&e).ok(),
                    ErrorCode::ValidationError,
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None, ErrorCode::BadRequest)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!(error_code = ErrorCode::Unauthorized.code(), "Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, msg, None, ErrorCode::Unauthorized)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::Storage(msg) => {
                tracing::error!(error_code = ErrorCode::StorageError.code(), "Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg,
                    None,
                    ErrorCode::StorageError,
                )
            }
            AppError::Upstream(msg) => {
                tracing::error!(error_code = ErrorCode::UpstreamError.code(), "Upstream error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg,
                    None,
                    ErrorCode::UpstreamError,
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg,
                    None,
                    ErrorCode::InternalError,
                )
            }
        };

        error_response_with_details(status, message, code, details)
    }
}

/// Build an error response in the standard shape.
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    error_response_with_details(status, message, error_code, None)
}

fn error_response_with_details(
    status: StatusCode,
    message: String,
    error_code: ErrorCode,
    details: Option<serde_json::Value>,
) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details,
    });

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404_with_error_key() {
        let response = AppError::NotFound("Event not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_of(response).await;
        assert_eq!(body.error, "NOT_FOUND");
        assert_eq!(body.message, "Event not found");
        assert!(body.details.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_401() {
        let response = AppError::Unauthorized("Invalid API key".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_of(response).await.code, 1006);
    }

    #[tokio::test]
    async fn test_upstream_maps_to_500() {
        let response = AppError::Upstream("directory unreachable".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await.error, "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_validation_errors_carry_field_details() {
        let mut errors = ValidationErrors::new();
        errors.add("label", validator::ValidationError::new("length"));

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body.error, "VALIDATION_ERROR");
        assert_eq!(body.message, "Request validation failed");
        assert!(body.details.unwrap().get("label").is_some());
    }
}
