//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: API-key exchange, signed token issuing and the bearer middleware
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = create_router::<ApiDoc>(Router::new()).await?;
//!     let config = ServerConfig::default();
//!     create_production_app(router, &config, std::time::Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod http;
pub mod server;

pub use auth::{AuthConfig, TokenAuth, TokenClaims, require_token};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};
