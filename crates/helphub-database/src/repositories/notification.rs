//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use helphub_core::error::{AppError, ErrorKind};
use helphub_core::result::AppResult;
use helphub_core::types::{NotificationId, UserId};
use helphub_entity::notification::Notification;

use crate::store::NotificationStore;

const COLUMNS: &str = "id, recipient_id, related_user_id, related_username, request_id, \
                       kind, content, created_at, is_read";

/// Repository for notification persistence.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, notification: &Notification) -> AppResult<()> {
        sqlx::query(&format!(
            "INSERT INTO notifications ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
        ))
        .bind(notification.id)
        .bind(notification.recipient_id)
        .bind(notification.related_user_id)
        .bind(&notification.related_username)
        .bind(notification.request_id)
        .bind(notification.kind)
        .bind(&notification.content)
        .bind(notification.created_at)
        .bind(notification.is_read)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })?;
        Ok(())
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find notification", e))
    }

    async fn find_by_recipient(&self, recipient_id: UserId) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications WHERE recipient_id = $1 ORDER BY created_at DESC"
        ))
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<bool> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn mark_all_read(&self, recipient_id: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    async fn has_unread(&self, recipient_id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM notifications WHERE recipient_id = $1 AND is_read = FALSE)",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check unread", e))
    }

    async fn count_unread(&self, recipient_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))?;
        Ok(count as u64)
    }
}
