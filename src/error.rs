//! Custom error types for staffing-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for staffing-cli operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StaffingError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for form input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport errors and non-success HTTP statuses
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server response did not match the expected shape
    #[error("Unexpected response shape: {0}")]
    Schema(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl StaffingError {
    /// Check if this error came from talking to the server
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Schema(_))
    }
}

impl From<std::io::Error> for StaffingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StaffingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for StaffingError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for staffing-cli operations
pub type StaffingResult<T> = Result<T, StaffingError>;
