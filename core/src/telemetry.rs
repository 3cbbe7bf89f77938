//! # Telemetry: Tracing Setup
//!
//! Chains log through `tracing`. These helpers install a subscriber for
//! binaries and demos; libraries embedding Cascade bring their own.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,cascade_core=debug";

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

fn filter(directives: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    match directives {
        Some(directives) => Ok(EnvFilter::try_new(directives)?),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Install a human-readable stdout subscriber.
///
/// `directives` overrides `RUST_LOG`; `None` falls back to it and then to
/// [`DEFAULT_FILTER`].
pub fn init_stdout_tracing(directives: Option<&str>) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(directives)?)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInstalled)
}

/// Install a JSON-lines subscriber, one object per event.
pub fn init_json_tracing(directives: Option<&str>) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter(directives)?)
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInstalled)
}
