//! # Error Types
//!
//! Structured error types for piping_core. Errors separate caller mistakes
//! (a request missing fields its standard needs) from reference data gaps
//! (a mandatory table row that does not exist), so a quoting front end can
//! decide whether to ask the user for more input or flag the data set.
//!
//! Missing *optional* data (flange, bolt and nut masses) never surfaces as a
//! `CalcError`; it is reported as warnings on the calculation result.
//!
//! ## Example
//!
//! ```rust
//! use piping_core::errors::{CalcError, CalcResult};
//!
//! fn validate_quantity(quantity: u32) -> CalcResult<()> {
//!     if quantity == 0 {
//!         return Err(CalcError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity must be at least 1",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for piping_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A field required by the selected standard is missing
    #[error("Missing required field: {field} ({reason})")]
    MissingField { field: String, reason: String },

    /// A mandatory reference record does not exist
    #[error("{record} not found for {key}")]
    NotFound { record: String, key: String },

    /// The reference data store failed to answer a query
    #[error("Reference data unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Snapshot schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotFound error naming the record kind and the key that missed
    pub fn not_found(record: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::NotFound {
            record: record.into(),
            key: key.into(),
        }
    }

    /// Create a StoreUnavailable error
    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        CalcError::StoreUnavailable {
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

    /// Check if this is a recoverable error (the caller may retry as-is)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::StoreUnavailable { .. } | CalcError::FileError { .. })
    }

    /// True for errors caused by the request itself rather than the data
    pub fn is_caller_error(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::MissingField { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::NotFound { .. } => "NOT_FOUND",
            CalcError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
