use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Label is required.")]
    MissingLabel,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] validator::ValidationErrors),

    #[error("State not found: {0}")]
    StateNotFound(String),

    #[error("Postal code not found: {0}")]
    PostalCodeNotFound(String),

    #[error("Coordinates not found for {0}")]
    CoordinatesNotFound(String),

    #[error("Location lookup failed: {0}")]
    Lookup(String),
}

pub type LocationResult<T> = Result<T, LocationError>;

impl From<reqwest::Error> for LocationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Lookup(err.to_string())
    }
}

/// Client mistakes are 400s; anything that went wrong upstream is a 500.
impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::MissingLabel => AppError::BadRequest(err.to_string()),
            LocationError::Validation(msg) => AppError::BadRequest(msg),
            LocationError::InvalidRequest(errors) => AppError::ValidationError(errors),
            LocationError::StateNotFound(_)
            | LocationError::PostalCodeNotFound(_)
            | LocationError::CoordinatesNotFound(_)
            | LocationError::Lookup(_) => AppError::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for LocationError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
