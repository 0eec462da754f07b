//! Application builder: wires router, middleware, and state into an Axum app.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::middleware::timeout::request_timeout;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let config = &state.config;

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.server.cors))
        .layer(from_fn(request_logging))
        .layer(from_fn_with_state(state.clone(), request_timeout))
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes));

    build_router(&config.storage)
        .layer(layers)
        .with_state(state)
}
