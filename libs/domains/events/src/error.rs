//! Event domain error types

use axum_helpers::AppError;
use domain_locations::LocationError;
use std::fmt;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Event domain errors
#[derive(Debug)]
pub enum EventError {
    /// No event with this id
    NotFound { id: i64 },

    /// Path id is not an integer
    InvalidId { raw: String },

    /// Query string could not be decoded, e.g. a repeated key
    InvalidQuery { message: String },

    /// `classificacao` names no known ordering
    InvalidSortStrategy { value: String },

    /// Events document could not be read
    Storage {
        message: String,
        source: Option<std::io::Error>,
    },

    /// Events document is not valid JSON of the expected shape
    Corrupt { message: String },

    /// Postal code could not be turned into a query point
    Location(LocationError),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "Event not found: {}", id),
            Self::InvalidId { raw } => write!(f, "Invalid event id: {}", raw),
            Self::InvalidQuery { message } => write!(f, "Invalid query: {}", message),
            Self::InvalidSortStrategy { value } => {
                write!(f, "Invalid sort strategy: {}", value)
            }
            Self::Storage { message, .. } => write!(f, "Storage error: {}", message),
            Self::Corrupt { message } => write!(f, "Corrupt events document: {}", message),
            Self::Location(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for EventError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage {
                source: Some(e), ..
            } => Some(e),
            Self::Location(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EventError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt {
            message: err.to_string(),
        }
    }
}

impl From<LocationError> for EventError {
    fn from(err: LocationError) -> Self {
        Self::Location(err)
    }
}

// Convert to axum_helpers::AppError for HTTP responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound { .. } => AppError::NotFound("Event not found".to_string()),
            EventError::InvalidId { .. }
            | EventError::InvalidQuery { .. }
            | EventError::InvalidSortStrategy { .. } => {
                AppError::BadRequest(err.to_string())
            }
            EventError::Storage { message, .. } => AppError::Storage(message),
            EventError::Corrupt { .. } => AppError::Storage(err.to_string()),
            EventError::Location(e) => e.into(),
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
