//! # Error Types
//!
//! Structured error types for rod_core. These errors are designed to be
//! informative for both humans and tools, providing enough context to
//! understand and fix a rejected configuration programmatically.
//!
//! A zero push force is *not* an error: the safety factor is reported as
//! [`SafetyFactor::Undefined`](crate::calculations::SafetyFactor::Undefined).
//!
//! ## Example
//!
//! ```rust
//! use rod_core::errors::{CalcError, CalcResult};
//!
//! fn validate_rod_diameter(rod_diameter_mm: f64) -> CalcResult<()> {
//!     if rod_diameter_mm <= 0.0 {
//!         return Err(CalcError::invalid_configuration(
//!             "rod_diameter",
//!             rod_diameter_mm.to_string(),
//!             "Rod diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_rod_diameter(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rod_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is non-positive, non-finite or otherwise out of domain.
    /// Raised while building a configuration, before any formula runs.
    #[error("Invalid configuration for '{field}': {value} - {reason}")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// File I/O error (reading a configuration document)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidConfiguration error
    pub fn invalid_configuration(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidConfiguration {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError { reason: reason.into() }
    }

    /// Name of the offending field, if this error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidConfiguration { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}
