//! Authentication module.
//!
//! - API-key exchange and stateless HS256 token issuing/verification
//! - Bearer token middleware for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{AuthConfig, TokenAuth, require_token};
//! use core_config::FromEnv;
//!
//! let config = AuthConfig::from_env()?;
//! let auth = TokenAuth::new(&config)?;
//!
//! let protected = Router::new()
//!     .route("/events", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, require_token));
//! ```

pub mod config;
pub mod middleware;
pub mod token;

pub use config::{AuthConfig, DEFAULT_TOKEN_TTL};
pub use middleware::require_token;
pub use token::{TokenAuth, TokenClaims};
