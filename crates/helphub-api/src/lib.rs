//! # helphub-api
//!
//! HTTP API layer for HelpHub built on Axum.
//!
//! Provides the REST endpoints for help requests and notifications,
//! middleware (CORS, access logging), the bearer-token extractor, DTOs,
//! and the mapping from [`AppError`](helphub_core::AppError) to HTTP
//! responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
