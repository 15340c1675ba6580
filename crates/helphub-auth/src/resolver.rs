//! Token → identity resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use helphub_core::error::{AppError, ErrorKind};
use helphub_core::result::AppResult;
use helphub_database::store::UserDirectory;
use helphub_entity::user::UserIdentity;

use crate::jwt::JwtDecoder;

/// Maps an opaque session token to a user identity.
#[async_trait]
pub trait IdentityResolver: Send + Sync + 'static {
    /// Resolve `token`. Fails with an `Authentication` error when the token
    /// is invalid or names no known user.
    async fn resolve(&self, token: &str) -> AppResult<UserIdentity>;
}

/// Resolves signed JWTs against the user directory.
///
/// The identity returned is the directory's record, so a role change takes
/// effect on the next request even for tokens issued earlier.
#[derive(Clone)]
pub struct JwtIdentityResolver {
    decoder: JwtDecoder,
    directory: Arc<dyn UserDirectory>,
}

impl std::fmt::Debug for JwtIdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIdentityResolver")
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl JwtIdentityResolver {
    /// Creates a resolver over `directory`.
    pub fn new(decoder: JwtDecoder, directory: Arc<dyn UserDirectory>) -> Self {
        Self { decoder, directory }
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(&self, token: &str) -> AppResult<UserIdentity> {
        let claims = self.decoder.decode(token)?;
        let user_id = claims.user_id();

        match self.directory.get_by_id(user_id).await {
            Ok(identity) => Ok(identity),
            Err(e) if e.kind == ErrorKind::NotFound => {
                debug!(user_id = %user_id, "Token subject is not a known user");
                Err(AppError::authentication("Session token does not match a user"))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use helphub_core::config::AuthConfig;
    use helphub_core::types::UserId;
    use helphub_database::memory::MemoryUserDirectory;
    use helphub_entity::user::UserRole;

    #[tokio::test]
    async fn test_resolves_directory_identity() {
        let config = AuthConfig::with_secret("resolver-test-secret");
        let directory = MemoryUserDirectory::new();
        let alice = UserIdentity::new(UserId::new(), "alice", UserRole::Member);
        directory.insert(alice.clone());
        let token = JwtEncoder::new(&config).issue(&alice).unwrap();

        directory.insert(UserIdentity::new(alice.id, "alice", UserRole::Admin));

        let resolver = JwtIdentityResolver::new(JwtDecoder::new(&config), Arc::new(directory));
        let resolved = resolver.resolve(&token).await.unwrap();
        assert_eq!(resolved.id, alice.id);
        assert!(resolved.is_admin());
    }

    #[tokio::test]
    async fn test_unknown_subject_is_unauthenticated() {
        let config = AuthConfig::with_secret("resolver-test-secret");
        let ghost = UserIdentity::new(UserId::new(), "ghost", UserRole::Member);
        let token = JwtEncoder::new(&config).issue(&ghost).unwrap();

        let resolver = JwtIdentityResolver::new(
            JwtDecoder::new(&config),
            Arc::new(MemoryUserDirectory::new()),
        );
        let err = resolver.resolve(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
