//! # CineMatch Core
//!
//! Shared building blocks for the CineMatch recommendation workspace.
//!
//! ## Modules
//!
//! - `error`: Error type for configuration, validation and data loading
//! - `config`: Environment configuration loading and validation
//! - `math`: Division-guarded vector primitives (cosine similarity, max-normalization)
//! - `observability`: Structured logging initialisation

pub mod config;
pub mod error;
pub mod math;
pub mod observability;

pub use config::{load_dotenv, parse_env_var, ConfigLoader, DataConfig, ServiceConfig};
pub use error::CineMatchError;
pub use math::{cosine_from_parts, normalize_by_max, round_to};
pub use observability::{init_logging, LogConfig, LogFormat, ObservabilityError};

/// Result type alias for CineMatch operations
pub type Result<T> = std::result::Result<T, CineMatchError>;
