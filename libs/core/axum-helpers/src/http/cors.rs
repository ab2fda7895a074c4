use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer restricted to the given origins.
///
/// - Methods: GET, POST, OPTIONS
/// - Headers: Content-Type, Authorization, Accept, x-api-key
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::HeaderName::from_static("x-api-key"),
        ])
        .max_age(Duration::from_secs(3600))
}

/// Creates a CORS layer that allows any origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
