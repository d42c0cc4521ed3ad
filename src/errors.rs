//! Error types for covmine collectors and their ambient layers.
//!
//! The engine modules (`graph`, `coverage`, `results`) only ever raise
//! [`CovmineError::MalformedGraphInput`]. Configuration and I/O variants belong
//! to the loader and the output writers. Errors leaving a collector or writer
//! are wrapped in [`CovmineError::InContext`], which keeps the inner code.
//!
//! An empty denominator is not an error: it yields a 0% metric.
//!
//! # Example
//!
//! ```rust
//! use covmine::errors::{CovmineError, ErrorCode};
//!
//! let err = CovmineError::malformed("org.foo.C1.m1", "call edge callee");
//! assert_eq!(err.code(), ErrorCode::MALFORMED_INPUT);
//! assert!(err.to_string().contains("org.foo.C1.m1"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Structured error code for programmatic handling.
///
/// - E001-E009: I/O errors
/// - E020-E029: Configuration errors
/// - E030-E039: Graph and coverage input errors
/// - E040-E049: Serialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// I/O error - generic
    pub const IO_GENERIC: ErrorCode = ErrorCode("E001");
    /// Config error - invalid value or unparsable file
    pub const CONFIG_INVALID: ErrorCode = ErrorCode("E020");
    /// Input error - unit referenced but never registered
    pub const MALFORMED_INPUT: ErrorCode = ErrorCode("E030");
    /// Input error - test pattern does not compile
    pub const INVALID_PATTERN: ErrorCode = ErrorCode("E031");
    /// Serialization error - generic
    pub const SERIALIZATION: ErrorCode = ErrorCode("E040");

    /// Get the error code string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Main error type for covmine operations
#[derive(Debug, Error)]
pub enum CovmineError {
    /// An edge or coverage entry references a unit that was never registered
    #[error("Malformed graph input: {context} references unregistered unit `{unit}`")]
    MalformedGraphInput { unit: String, context: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// File system errors raised by the output writers
    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Output encoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Test-node pattern errors
    #[error(transparent)]
    InvalidPattern(#[from] regex::Error),

    /// Failure tagged with the collector phase it was raised in
    #[error("{context}: {source}")]
    InContext {
        context: String,
        #[source]
        source: Box<CovmineError>,
    },
}

impl CovmineError {
    /// Create a malformed-input error for an unregistered unit
    pub fn malformed(unit: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MalformedGraphInput {
            unit: unit.into(),
            context: context.into(),
        }
    }

    /// Create a configuration error, optionally tied to a config file
    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
        }
    }

    /// Create an I/O error with path context
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Tag the error with the phase it was raised in, e.g. `collecting:direct_coverage (method)`.
    pub fn in_context(self, context: impl std::fmt::Display) -> Self {
        Self::InContext {
            context: context.to_string(),
            source: Box::new(self),
        }
    }

    /// The error without any context tags
    pub fn root(&self) -> &CovmineError {
        match self {
            Self::InContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Get the structured error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedGraphInput { .. } => ErrorCode::MALFORMED_INPUT,
            Self::Config { .. } => ErrorCode::CONFIG_INVALID,
            Self::Io { .. } => ErrorCode::IO_GENERIC,
            Self::Serialization(_) => ErrorCode::SERIALIZATION,
            Self::InvalidPattern(_) => ErrorCode::INVALID_PATTERN,
            Self::InContext { source, .. } => source.code(),
        }
    }

    /// Whether the error is caused by the data handed in by a front end.
    pub fn is_input_error(&self) -> bool {
        matches!(self.root(), Self::MalformedGraphInput { .. })
    }
}

impl From<std::io::Error> for CovmineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for CovmineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, CovmineError>;
