use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A boxed readiness check that reports failure as a message
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs readiness checks concurrently and aggregates the results.
///
/// Returns 200 with `{"status": "ready", "<name>": "ok", ...}` when every
/// check passes, otherwise 503 with the failing checks marked `"failing"`.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
///     ("store", Box::pin(async { store.load_snapshot().await.map(|_| ()).map_err(|e| e.to_string()) })),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> Response {
    let (names, futures): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let results = join_all(futures).await;

    let mut body = Map::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        let status = match result {
            Ok(()) => "ok",
            Err(e) => {
                tracing::error!(check = name, error = %e, "Readiness check failed");
                all_healthy = false;
                "failing"
            }
        };
        body.insert(name.to_string(), json!(status));
    }

    body.insert(
        "status".to_string(),
        json!(if all_healthy { "ready" } else { "not ready" }),
    );

    let status = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(Value::Object(body))).into_response()
}

/// Liveness handler: 200 with app name and version while the process is up.
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    let response = HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Router with the `/health` liveness endpoint.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn json_of(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_all_checks_passing_is_ready() {
        let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![("store", Box::pin(async { Ok(()) }))];

        let response = run_health_checks(checks).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_of(response).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["store"], "ok");
    }

    #[tokio::test]
    async fn test_failing_check_is_not_ready() {
        let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
            ("store", Box::pin(async { Ok(()) })),
            ("directory", Box::pin(async { Err("timeout".to_string()) })),
        ];

        let response = run_health_checks(checks).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = json_of(response).await;
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["directory"], "failing");
    }
}
