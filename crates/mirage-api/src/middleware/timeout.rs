//! Per-request deadline.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use mirage_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Abort the request after `server.request_timeout_seconds` with
/// ServiceUnavailable. The handler future is dropped; nothing else is
/// cancelled.
pub async fn request_timeout(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limit = Duration::from_secs(state.config.server.request_timeout_seconds);
    let path = request.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(path = %path, timeout_secs = limit.as_secs(), "Request timed out");
            ApiError(AppError::service_unavailable("Request timed out")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{self, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    use mirage_core::config::AppConfig;
    use mirage_database::Repositories;

    async fn state(dir: &tempfile::TempDir) -> AppState {
        let mut config = AppConfig::default();
        config.server.request_timeout_seconds = 1;
        config.storage.local.root_path = dir.path().to_string_lossy().into_owned();
        let storage = mirage_storage::connect(&config.storage)
            .await
            .expect("storage");
        AppState::new(config, Repositories::memory(), storage)
    }

    #[tokio::test]
    async fn test_slow_handler_gets_503() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = state(&dir).await;
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }))
            .layer(axum::middleware::from_fn_with_state(
                state.clone(),
                request_timeout,
            ))
            .with_state(state);

        let response = app
            .clone()
            .oneshot(http::Request::builder().uri("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(http::Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
