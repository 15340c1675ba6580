//! User directory backed by the `users` table.

use async_trait::async_trait;
use sqlx::PgPool;

use helphub_core::error::{AppError, ErrorKind};
use helphub_core::result::AppResult;
use helphub_core::types::UserId;
use helphub_entity::user::UserIdentity;

use crate::store::UserDirectory;

/// Repository for user identity lookups.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn get_by_id(&self, id: UserId) -> AppResult<UserIdentity> {
        sqlx::query_as::<_, UserIdentity>("SELECT id, username, role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}
