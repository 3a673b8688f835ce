//! Error types for billiard tracking
//!
//! Provides a unified error type for all billiard crates. Frame processing
//! itself never fails; errors only arise while building or loading
//! configuration.

use thiserror::Error;

/// Core error type for billiard tracking operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::InvalidParameter(format!("{context} must be finite"))
    }

    /// Create an error for a value that must not be negative
    pub fn negative(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must not be negative, got {value}"))
    }

    /// Create an error for a lower bound exceeding its upper bound
    pub fn inverted_range(min_name: &str, max_name: &str) -> Self {
        Self::InvalidParameter(format!("{min_name} must not exceed {max_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("max_time must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: max_time must be positive");

        let err = Error::InvalidInput("duplicate ball id".to_string());
        assert_eq!(err.to_string(), "Invalid input: duplicate ball id");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::non_finite("min_time");
        assert_eq!(err.to_string(), "Invalid parameter: min_time must be finite");

        let err = Error::negative("max_time", -1.5);
        assert_eq!(
            err.to_string(),
            "Invalid parameter: max_time must not be negative, got -1.5"
        );

        let err = Error::inverted_range("min_time", "max_time");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: min_time must not exceed max_time"
        );
    }

    #[test]
    fn test_error_from_serde() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err: Error = parse_err.into();

        match err {
            Error::Serialization(_) => {
                assert!(err.to_string().starts_with("Serialization error:"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }
}
