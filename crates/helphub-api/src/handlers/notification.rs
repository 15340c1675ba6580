//! Notification handlers.

use axum::Json;
use axum::extract::State;

use helphub_core::types::NotificationId;
use helphub_entity::notification::Notification;

use crate::dto::response::{ApiResponse, MarkedResponse, MessageResponse, UnreadResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state.notification_service.list_for_user(&auth).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/unread
pub async fn unread(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UnreadResponse>>, ApiError> {
    let has_unread = state.notification_service.has_unread(&auth).await?;
    let count = if has_unread {
        state.notification_service.unread_count(&auth).await?
    } else {
        0
    };
    Ok(Json(ApiResponse::ok(UnreadResponse { has_unread, count })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath<NotificationId>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Marked as read"))))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MarkedResponse>>, ApiError> {
    let marked = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(MarkedResponse { marked })))
}
