//! Error types shared across CineMatch crates

use thiserror::Error;

/// Errors raised at the edges of the system: configuration, request
/// validation and dataset loading.
///
/// The scoring core never produces these. Degenerate queries there resolve
/// to empty or zeroed results instead.
#[derive(Debug, Error)]
pub enum CineMatchError {
    /// Invalid or missing configuration value
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        key: Option<String>,
    },

    /// Caller supplied input outside the accepted range
    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        field: Option<String>,
    },

    /// Malformed record in a tabular source file
    #[error("Data error in {source_name} at line {line}: {message}")]
    DataError {
        message: String,
        source_name: String,
        line: usize,
    },

    /// Underlying I/O failure while reading a source
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CineMatchError {
    /// Create a validation error without a field
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error tied to a request field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a configuration error for an environment key
    pub fn configuration(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Create a data error for a line in a named source
    pub fn data(message: impl Into<String>, source_name: impl Into<String>, line: usize) -> Self {
        Self::DataError {
            message: message.into(),
            source_name: source_name.into(),
            line,
        }
    }

    /// Whether the error was caused by the caller rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_field_carries_field() {
        let err = CineMatchError::validation_field("weight out of range", "genre_weights");
        match err {
            CineMatchError::ValidationError { message, field } => {
                assert_eq!(message, "weight out of range");
                assert_eq!(field.as_deref(), Some("genre_weights"));
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_data_error_display() {
        let err = CineMatchError::data("expected 4 fields", "u.data", 12);
        assert_eq!(
            err.to_string(),
            "Data error in u.data at line 12: expected 4 fields"
        );
    }

    #[test]
    fn test_is_client_error() {
        assert!(CineMatchError::validation("bad").is_client_error());
        assert!(!CineMatchError::configuration("bad", "KEY").is_client_error());
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(!CineMatchError::from(io).is_client_error());
    }
}
