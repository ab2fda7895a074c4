//! Type-safe error codes for API responses.
//!
//! Each code carries:
//! - a string identifier for clients (e.g. "VALIDATION_ERROR")
//! - an integer for logs and dashboards (e.g. 1001)
//! - a default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Requested resource was not found
    NotFound,

    /// Authentication credentials are missing or invalid
    Unauthorized,

    /// Request parameters are well-formed but not acceptable
    BadRequest,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    // Storage errors (2000-2999)
    /// The backing record store could not be read
    StorageError,

    // Upstream errors (6000s)
    /// An external service failed or returned unusable data
    UpstreamError,
}

impl ErrorCode {
    /// String representation for client consumption.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::BadRequest => "BAD_REQUEST",
            Self::InternalError => "INTERNAL_ERROR",
            Self::StorageError => "STORAGE_ERROR",
            Self::UpstreamError => "UPSTREAM_ERROR",
        }
    }

    /// Integer code used in structured logs.
    ///
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: storage errors
    /// - 6000-6999: upstream service errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::BadRequest => 1012,

            Self::StorageError => 2001,

            Self::UpstreamError => 6001,
        }
    }

    /// Default user-facing error message.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "Authentication required",
            Self::BadRequest => "Bad request",
            Self::InternalError => "An internal server error occurred",
            Self::StorageError => "Event store could not be read",
            Self::UpstreamError => "External service request failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
