//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod feed;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, MAX_SESSION_TTL_HOURS};
pub use self::database::DatabaseConfig;
pub use self::feed::FeedConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::{LocalStorageConfig, S3StorageConfig, StorageConfig};

use crate::error::AppError;

/// Prefix for environment variable overrides (`MIRAGE__SERVER__PORT=9000`).
const ENV_PREFIX: &str = "MIRAGE";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session and credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Object storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Feed pagination settings.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, the environment-specific overlay
    /// `config/{env}.toml`, and environment variables prefixed with
    /// `MIRAGE__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::internal(format!("Failed to deserialize config: {e}")))?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject configurations that cannot start a server.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.database.provider.as_str() {
            "postgres" | "memory" => {}
            other => {
                return Err(AppError::internal(format!(
                    "Unknown database provider '{other}'"
                )));
            }
        }
        match self.storage.provider.as_str() {
            "local" | "s3" => {}
            other => {
                return Err(AppError::internal(format!(
                    "Unknown storage provider '{other}'"
                )));
            }
        }
        if self.feed.page_size == 0 {
            return Err(AppError::internal("feed.page_size must be at least 1"));
        }
        if self.auth.session_secret.len() < 16 {
            return Err(AppError::internal(
                "auth.session_secret must be at least 16 bytes",
            ));
        }
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.auth.session_ttl_hours) {
            return Err(AppError::internal(format!(
                "auth.session_ttl_hours must be between 1 and {MAX_SESSION_TTL_HOURS}"
            )));
        }
        Ok(())
    }
}
