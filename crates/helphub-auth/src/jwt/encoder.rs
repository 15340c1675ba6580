//! JWT token creation.
//!
//! Production tokens come from the identity service; this encoder exists so
//! tooling and tests can mint tokens signed with the shared secret.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use helphub_core::config::AuthConfig;
use helphub_core::error::AppError;
use helphub_entity::user::UserIdentity;

use super::claims::Claims;

/// Creates signed session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.jwt_access_ttl_minutes as i64,
        }
    }

    /// Issues a session token for `user`.
    pub fn issue(&self, user: &UserIdentity) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.into_uuid(),
            role: user.role,
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::minutes(self.access_ttl_minutes)).timestamp(),
            jti: Uuid::new_v4(),
        };
        self.sign(&claims)
    }

    /// Signs arbitrary claims.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }
}
