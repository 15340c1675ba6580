//! Route definitions for the HelpHub HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router. Middleware is layered on in [`crate::app`].
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(request_routes())
        .merge(notification_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Help request CRUD and lifecycle transitions
fn request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/requests",
            get(handlers::request::list_requests).post(handlers::request::create_request),
        )
        .route(
            "/requests/{id}",
            get(handlers::request::get_request)
                .put(handlers::request::update_request)
                .delete(handlers::request::delete_request),
        )
        .route("/requests/{id}/volunteer", post(handlers::request::volunteer))
        .route("/requests/{id}/accept", post(handlers::request::accept))
        .route("/requests/{id}/complete", post(handlers::request::complete))
        .route("/requests/{id}/cancel", post(handlers::request::cancel))
        .route("/requests/{id}/withdraw", post(handlers::request::withdraw))
}

/// Notification inbox
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route("/notifications/unread", get(handlers::notification::unread))
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
