//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an environment overlay, and `MOMENTOS__*`
//! environment variables. Each sub-module represents a logical section.

pub mod app;
pub mod auth;
pub mod database;
pub mod email;
pub mod feed;
pub mod logging;
pub mod media;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, PasswordResetConfig};
pub use self::database::DatabaseConfig;
pub use self::email::EmailConfig;
pub use self::feed::FeedConfig;
pub use self::logging::LoggingConfig;
pub use self::media::MediaConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`MOMENTOS__DATABASE__URL`).
const ENV_PREFIX: &str = "MOMENTOS";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings. `database.url` has no default.
    pub database: DatabaseConfig,
    /// Session and CSRF settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Password-reset code settings.
    #[serde(default)]
    pub password_reset: PasswordResetConfig,
    /// Upload storage settings.
    #[serde(default)]
    pub media: MediaConfig,
    /// Feed paging and thresholds.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Outbound email settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with `config/{env}.toml` and environment
    /// variables prefixed with `MOMENTOS__`.
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
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Build a configuration with every default and the given database URL.
    pub fn with_database_url(url: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .set_override("database.url", url)?
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
