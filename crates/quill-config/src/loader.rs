//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, Environment, File};
use quill_core::{QuillError, QuillResult};
use std::path::Path;
use tracing::debug;

/// Loads [`AppConfig`] from TOML files and environment variables.
///
/// Sources are applied in order, later sources overriding earlier ones:
/// 1. `config/default.toml`
/// 2. `config/{environment}.toml` (selected by `QUILL_ENV`, default
///    `development`)
/// 3. Environment variables with a `QUILL_` prefix, `__` as the section
///    separator (e.g. `QUILL_DATABASE__URL`).
pub struct ConfigLoader {
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a loader rooted at the given directory.
    #[must_use]
    pub fn new(config_dir: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Creates a loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Loads the configuration.
    pub fn load(&self) -> QuillResult<AppConfig> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("QUILL_ENV").unwrap_or_else(|_| "development".to_string());

        let default_path = format!("{}/default", self.config_dir);
        let env_path = format!("{}/{}", self.config_dir, environment);

        let mut builder = Config::builder();

        if Path::new(&format!("{default_path}.toml")).exists() {
            builder = builder.add_source(File::with_name(&default_path));
        }
        if Path::new(&format!("{env_path}.toml")).exists() {
            builder = builder.add_source(File::with_name(&env_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("QUILL")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| QuillError::Configuration(e.to_string()))?;

        config
            .try_deserialize::<AppConfig>()
            .map_err(|e| QuillError::Configuration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let loader = ConfigLoader::new("/nonexistent/config/dir");
        let config = loader.load().expect("defaults should load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.notifications.heartbeat_secs, 15);
        assert_eq!(config.redis.user_ttl_secs, 60);
    }
}
