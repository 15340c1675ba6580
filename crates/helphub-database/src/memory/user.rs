//! In-memory user directory.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use helphub_core::error::AppError;
use helphub_core::result::AppResult;
use helphub_core::types::UserId;
use helphub_entity::user::UserIdentity;

use crate::store::UserDirectory;

/// `UserDirectory` filled by the caller.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<DashMap<UserId, UserIdentity>>,
}

impl MemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub fn insert(&self, user: UserIdentity) {
        self.users.insert(user.id, user);
    }

    /// Remove a user, returning it if it was present.
    pub fn remove(&self, id: UserId) -> Option<UserIdentity> {
        self.users.remove(&id).map(|(_, user)| user)
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn get_by_id(&self, id: UserId) -> AppResult<UserIdentity> {
        self.users
            .get(&id)
            .map(|user| user.value().clone())
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }
}
