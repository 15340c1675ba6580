//! JWT claims carried by session tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use helphub_core::types::UserId;
use helphub_entity::user::UserRole;

/// Claims payload embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: Uuid,
    /// Role at the time of issuance. The directory's role wins on lookup.
    pub role: UserRole,
    /// Username for convenience.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}
