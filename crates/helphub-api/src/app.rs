//! Application builder: wires router, middleware, and state into an Axum app.

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    build_router(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}
