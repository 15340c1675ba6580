//! Resolved user identity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helphub_core::types::UserId;

use super::role::UserRole;

/// A user as resolved from a session token or looked up by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserIdentity {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name used in notification text.
    pub username: String,
    /// Role carried by the identity.
    pub role: UserRole,
}

impl UserIdentity {
    /// Create a new identity.
    pub fn new(id: UserId, username: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
