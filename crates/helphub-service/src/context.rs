//! Request context carrying the resolved caller.

use serde::{Deserialize, Serialize};

use helphub_core::types::UserId;
use helphub_entity::user::{UserIdentity, UserRole};

/// Context for the current authenticated operation.
///
/// Built from the identity the resolver returned and passed into service
/// methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The acting user's role, as stored in the user directory.
    pub role: UserRole,
    /// The acting user's username.
    pub username: String,
}

impl RequestContext {
    /// Creates a context for `identity`.
    pub fn new(identity: UserIdentity) -> Self {
        Self {
            user_id: identity.id,
            role: identity.role,
            username: identity.username,
        }
    }

    /// The acting user as an identity value.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(self.user_id, self.username.clone(), self.role)
    }
}

impl From<UserIdentity> for RequestContext {
    fn from(identity: UserIdentity) -> Self {
        Self::new(identity)
    }
}
