use super::token::TokenAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Read the credential from `Authorization`, with or without a `Bearer ` prefix.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();

    (!token.is_empty()).then_some(token)
}

/// Bearer token middleware.
///
/// Rejects the request with 401 before it reaches the handler unless the
/// token has a valid signature and has not expired. On success the decoded
/// [`TokenClaims`](super::token::TokenClaims) are inserted into request extensions.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/events", get(list_events))
///     .layer(axum::middleware::from_fn_with_state(auth.clone(), require_token));
/// ```
pub async fn require_token(
    State(auth): State<TokenAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token(request.headers()) else {
        tracing::debug!("No token in Authorization header");
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    };

    let claims = auth.verify_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        AppError::Unauthorized("Unauthorized".to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
