//! Structured logging initialisation
//!
//! Sets up a `tracing-subscriber` registry with an `EnvFilter` and either a
//! JSON or a human-readable fmt layer. `RUST_LOG` wins over the configured
//! level when it is set.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging setup errors
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{0}': {1}")]
    InvalidFilter(String, String),

    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line, for log shippers
    #[default]
    Json,
    /// Multi-line human readable output for local runs
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{}' (expected json or pretty)", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Service identifier attached to the startup event
    pub service_name: String,
    /// Default filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "cinematch".to_string(),
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl LogConfig {
    /// Build the filter, preferring `RUST_LOG` over the configured level
    pub fn env_filter(&self) -> Result<EnvFilter, ObservabilityError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level)
                .map_err(|e| ObservabilityError::InvalidFilter(self.level.clone(), e.to_string())),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Must be called once at application startup.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), ObservabilityError> {
    let env_filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init(),
    }
    .map_err(|e| ObservabilityError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        service_name = %config.service_name,
        format = %config.format,
        "Logging initialized"
    );

    Ok(())
}
