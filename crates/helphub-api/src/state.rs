//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use helphub_auth::resolver::IdentityResolver;
use helphub_core::config::AppConfig;
use helphub_service::notification::NotificationService;
use helphub_service::request::RequestService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Bearer token → user identity
    pub resolver: Arc<dyn IdentityResolver>,
    /// Request lifecycle service
    pub request_service: Arc<RequestService>,
    /// Notification service
    pub notification_service: Arc<NotificationService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("request_service", &self.request_service)
            .field("notification_service", &self.notification_service)
            .finish_non_exhaustive()
    }
}
