//! Tracing subscriber setup.

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use bucketry_core::config::logging::LoggingConfig;
use bucketry_core::error::AppError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. The formatter is
/// JSON when `format` is `"json"` and human-readable otherwise. Fails if a
/// global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    result.map_err(|e| AppError::internal(format!("Failed to install tracing subscriber: {e}")))?;

    info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}
