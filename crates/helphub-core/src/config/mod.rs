//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (default.toml + environment overlay + `HELPHUB__*` variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Token verification settings.
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default` with the `config/{env}` overlay and
    /// environment variables prefixed with `HELPHUB__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HELPHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        app.validate()?;
        Ok(app)
    }

    /// Load configuration from a single TOML string. Used by tests and tools
    /// that do not want to touch the filesystem.
    pub fn from_toml(contents: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?;
        let app: Self = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Checks values that deserialize fine but must not reach a running
    /// server.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()
    }
}
