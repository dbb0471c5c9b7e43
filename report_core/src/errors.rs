//! # Error Types
//!
//! Structured error types for report_core. Every failure of a report
//! generation call is terminal for that call; callers map the variant to a
//! response (e.g. "not found" vs "try again") using [`ReportError::error_code`]
//! and [`ReportError::is_retryable`].
//!
//! ## Example
//!
//! ```rust
//! use report_core::errors::{ReportError, ReportResult};
//!
//! fn require_positive(field: &str, value: f64) -> ReportResult<f64> {
//!     if value <= 0.0 {
//!         return Err(ReportError::invalid_input(field, value.to_string(), "must be positive"));
//!     }
//!     Ok(value)
//! }
//!
//! assert!(require_positive("timeout_secs", 0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for report_core operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Structured error type for report generation and snapshot I/O.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum ReportError {
    /// No project was supplied to the generator
    #[error("Project not found")]
    NotFound,

    /// Collecting the encoded document exceeded the configured bound
    #[error("Report generation timed out after {seconds:.1}s")]
    GenerationTimeout { seconds: f64 },

    /// Emitting or encoding a chunk of the document failed
    #[error("Report stream failed: {reason}")]
    StreamFailure { reason: String },

    /// Encoding finished but produced zero bytes
    #[error("Report generation produced an empty document")]
    EmptyOutput,

    /// An input value is invalid (configuration, CLI argument, snapshot field)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Snapshot schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl ReportError {
    /// Create a StreamFailure error
    pub fn stream_failure(reason: impl Into<String>) -> Self {
        ReportError::StreamFailure {
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether a caller may retry the same request (with backoff).
    ///
    /// Timeouts and stream failures are transient; a missing project or an
    /// empty document will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReportError::GenerationTimeout { .. } | ReportError::StreamFailure { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ReportError::NotFound => "NOT_FOUND",
            ReportError::GenerationTimeout { .. } => "GENERATION_TIMEOUT",
            ReportError::StreamFailure { .. } => "STREAM_FAILURE",
            ReportError::EmptyOutput => "EMPTY_OUTPUT",
            ReportError::InvalidInput { .. } => "INVALID_INPUT",
            ReportError::FileError { .. } => "FILE_ERROR",
            ReportError::SerializationError { .. } => "SERIALIZATION_ERROR",
            ReportError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::SerializationError {
            reason: e.to_string(),
        }
    }
}
