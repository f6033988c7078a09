//! Shared configuration loader for CineMatch services
//!
//! Configuration is read from environment variables with the `CINEMATCH_`
//! prefix. A `.env` file is honoured through dotenvy. Override order is
//! defaults < .env < environment.
//!
//! # Example
//!
//! ```no_run
//! use cinematch_core::config::{load_dotenv, ConfigLoader, DataConfig, ServiceConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! load_dotenv();
//!
//! let service_config = ServiceConfig::from_env()?;
//! let data_config = DataConfig::from_env()?;
//!
//! service_config.validate()?;
//! data_config.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::CineMatchError;
use crate::observability::LogFormat;
use std::path::PathBuf;

/// Configuration loader trait
///
/// Provides standardized methods for loading and validating configuration
/// from environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables, falling back to
    /// defaults for unset optional values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a value is set but cannot be parsed.
    fn from_env() -> Result<Self, CineMatchError>;

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any validation check fails.
    fn validate(&self) -> Result<(), CineMatchError>;
}

/// HTTP service configuration
///
/// # Environment Variables
///
/// - `CINEMATCH_SERVICE_HOST` (optional): bind host (default: "0.0.0.0")
/// - `CINEMATCH_SERVICE_PORT` (optional): bind port (default: 8082, fallback `PORT`)
/// - `CINEMATCH_SERVICE_WORKERS` (optional): worker threads (default: CPU count)
/// - `CINEMATCH_SERVICE_LOG_LEVEL` (optional): log level (default: "info", fallback `RUST_LOG`)
/// - `CINEMATCH_LOG_FORMAT` (optional): "json" or "pretty" (default: "json")
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service bind host
    pub host: String,
    /// Service bind port
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            workers: num_cpus::get(),
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl ConfigLoader for ServiceConfig {
    fn from_env() -> Result<Self, CineMatchError> {
        let defaults = ServiceConfig::default();

        let host = std::env::var("CINEMATCH_SERVICE_HOST")
            .or_else(|_| std::env::var("HOST"))
            .unwrap_or(defaults.host);

        let port = match std::env::var("CINEMATCH_SERVICE_PORT") {
            Ok(_) => parse_env_var("CINEMATCH_SERVICE_PORT", defaults.port)?,
            Err(_) => parse_env_var("PORT", defaults.port)?,
        };

        let workers = parse_env_var("CINEMATCH_SERVICE_WORKERS", defaults.workers)?;

        let log_level = std::env::var("CINEMATCH_SERVICE_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(defaults.log_level);

        let log_format = parse_env_var("CINEMATCH_LOG_FORMAT", defaults.log_format)?;

        Ok(Self {
            host,
            port,
            workers,
            log_level,
            log_format,
        })
    }

    fn validate(&self) -> Result<(), CineMatchError> {
        if self.port == 0 {
            return Err(CineMatchError::configuration(
                "port must be greater than 0",
                "CINEMATCH_SERVICE_PORT",
            ));
        }

        if self.workers == 0 {
            return Err(CineMatchError::configuration(
                "workers must be greater than 0",
                "CINEMATCH_SERVICE_WORKERS",
            ));
        }

        // RUST_LOG may carry directives like "cinematch=debug", only the
        // simple form is checked here.
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        let level = self.log_level.to_lowercase();
        if !level.contains('=') && !valid_log_levels.contains(&level.as_str()) {
            return Err(CineMatchError::configuration(
                format!(
                    "Invalid log_level '{}'. Must be one of: {}",
                    self.log_level,
                    valid_log_levels.join(", ")
                ),
                "CINEMATCH_SERVICE_LOG_LEVEL",
            ));
        }

        Ok(())
    }
}

/// Location of the MovieLens source files
///
/// # Environment Variables
///
/// - `CINEMATCH_DATA_DIR` (optional): directory holding `u.data` and `u.item`
///   (default: "./data/ml-100k")
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/ml-100k"),
        }
    }
}

impl ConfigLoader for DataConfig {
    fn from_env() -> Result<Self, CineMatchError> {
        let data_dir = std::env::var("CINEMATCH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| DataConfig::default().data_dir);

        Ok(Self { data_dir })
    }

    fn validate(&self) -> Result<(), CineMatchError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(CineMatchError::configuration(
                "data_dir must not be empty",
                "CINEMATCH_DATA_DIR",
            ));
        }

        Ok(())
    }
}

/// Parse an environment variable, returning `default` when it is unset.
///
/// # Errors
///
/// Returns a `ConfigurationError` if the variable is set but cannot be parsed.
pub fn parse_env_var<T>(key: &str, default: T) -> Result<T, CineMatchError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| CineMatchError::configuration(format!("Failed to parse {}: {}", key, e), key))
        })
        .unwrap_or(Ok(default))
}

/// Load .env file if present
///
/// A missing file is not an error.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }
}
