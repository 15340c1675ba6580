//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session-token verification settings.
///
/// Tokens are issued by the external identity service; HelpHub only
/// verifies them, so the secret must match the issuer's. There is no
/// built-in secret: it comes from the config files or
/// `HELPHUB__AUTH__JWT_SECRET`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT verification (HMAC-SHA256).
    pub jwt_secret: String,
    /// Access token TTL in minutes, used when minting tokens for tooling.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Allowed clock skew in seconds when checking expiry.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
}

/// Prefix of the placeholder secrets shipped in sample configs.
const PLACEHOLDER_PREFIX: &str = "CHANGE_ME";

impl AuthConfig {
    /// Settings with `secret` and default timings.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            jwt_access_ttl_minutes: default_access_ttl(),
            leeway_seconds: default_leeway(),
        }
    }

    /// Reject an empty or placeholder secret.
    pub fn validate(&self) -> Result<(), AppError> {
        let secret = self.jwt_secret.trim();
        if secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret is empty"));
        }
        if secret.starts_with(PLACEHOLDER_PREFIX) {
            return Err(AppError::configuration(
                "auth.jwt_secret still holds the placeholder value",
            ));
        }
        Ok(())
    }
}

fn default_access_ttl() -> u64 {
    60
}

fn default_leeway() -> u64 {
    5
}
