//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::GameError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence when set; otherwise the configured level is
/// used as the filter directive.
///
/// # Errors
///
/// Returns [`GameError::Logging`] if a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), GameError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };

    result.map_err(|e| GameError::Logging(e.to_string()))
}
