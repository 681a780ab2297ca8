//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level so a single run can
//! be made more verbose without touching configuration files.

use tracing_subscriber::EnvFilter;

use otp_shared::config::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Build the filter: `RUST_LOG` if set and valid, else `config.level`
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            InfrastructureError::Config(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}

/// Install the global tracing subscriber
///
/// Fails if the level directive is invalid or a global subscriber is
/// already installed.
pub fn init(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.target)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().with_ansi(config.colored).try_init(),
        LogFormat::Compact => builder.compact().with_ansi(config.colored).try_init(),
    };

    result.map_err(|e| InfrastructureError::Config(format!("Failed to install subscriber: {}", e)))?;

    tracing::debug!(
        level = %config.level,
        format = ?config.format,
        "Logging initialized"
    );
    Ok(())
}
