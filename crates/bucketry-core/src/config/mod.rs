//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod backends;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::backends::BackendsConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root configuration.
///
/// The deserialization target for the merged TOML files
/// (default.toml + environment overlay + `BUCKETRY__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend bindings for bucket descriptors.
    #[serde(default)]
    pub backends: BackendsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with `config/{env}.toml` and environment
    /// variables prefixed with `BUCKETRY__`. Missing files are skipped.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env)
    }

    /// Like [`load`](Self::load), reading the TOML files from `dir`.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default.toml")).required(false))
            .add_source(config::File::from(dir.join(format!("{env}.toml"))).required(false))
            .add_source(
                config::Environment::with_prefix("BUCKETRY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
