//! Error types and handling for Gridsense
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting.

use thiserror::Error;

/// Result type alias for Gridsense operations
pub type Result<T> = std::result::Result<T, GridsenseError>;

/// Main error type for Gridsense
#[derive(Debug, Error)]
pub enum GridsenseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Pricing API fetch errors (transport, non-2xx status, or decode)
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Signal publishing errors from the host sink
    #[error("Publish error: {message}")]
    Publish { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl GridsenseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        GridsenseError::Config {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        GridsenseError::Fetch {
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        GridsenseError::Io {
            message: message.into(),
        }
    }

    /// Create a new publish error
    pub fn publish<S: Into<String>>(message: S) -> Self {
        GridsenseError::Publish {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        GridsenseError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        GridsenseError::Generic {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for GridsenseError {
    fn from(err: std::io::Error) -> Self {
        GridsenseError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for GridsenseError {
    fn from(err: serde_yaml::Error) -> Self {
        GridsenseError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GridsenseError {
    fn from(err: serde_json::Error) -> Self {
        GridsenseError::Serialization {
            message: err.to_string(),
        }
    }
}

// All reqwest failures (connect, timeout, status, body decode) surface as the
// single fetch kind; the monitor recovers from them uniformly.
impl From<reqwest::Error> for GridsenseError {
    fn from(err: reqwest::Error) -> Self {
        GridsenseError::fetch(err.to_string())
    }
}

impl From<chrono::ParseError> for GridsenseError {
    fn from(err: chrono::ParseError) -> Self {
        GridsenseError::validation("datetime", &err.to_string())
    }
}
