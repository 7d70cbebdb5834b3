//! Tracing setup shared by every binary that embeds the library.

use std::fmt;

use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Install the global tracing subscriber.
///
/// The filter honors `RUST_LOG` when set and falls back to the configured log
/// level otherwise. Output is compact, without ANSI colors, so it stays
/// readable when shipped to a log collector.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|source| {
            TelemetryError::EnvFilter {
                value: config.log_level.clone(),
                source: Box::new(source),
            }
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)?;

    Ok(())
}

/// Failures while installing the tracing subscriber.
#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter {
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, source } => {
                write!(f, "invalid log filter {value:?}: {source}")
            }
            TelemetryError::Subscriber(source) => {
                write!(f, "could not install tracing subscriber: {source}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source.as_ref()),
            TelemetryError::Subscriber(source) => Some(source.as_ref()),
        }
    }
}
