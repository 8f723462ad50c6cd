//! Error types for the Spanfold library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SpanfoldError`] enum.
//!
//! # Examples
//!
//! ```
//! use spanfold::error::{Result, SpanfoldError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SpanfoldError::configuration("no fields given"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Spanfold operations.
#[derive(Error, Debug)]
pub enum SpanfoldError {
    /// I/O errors (request files, CLI input)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, unknown analyzer)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors (malformed request, unsupported parameter)
    #[error("Query error: {0}")]
    Query(String),

    /// Invalid configuration (no fields, tie breaker out of range)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Raised by a term expression provider while expanding a term
    #[error("Provider error: {0}")]
    Provider(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SpanfoldError.
pub type Result<T> = std::result::Result<T, SpanfoldError>;

impl SpanfoldError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SpanfoldError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        SpanfoldError::Query(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        SpanfoldError::Query(msg.into()) // Parse errors are treated as query errors
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        SpanfoldError::Configuration(msg.into())
    }

    /// Create a new provider error.
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        SpanfoldError::Provider(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SpanfoldError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SpanfoldError::Other(format!("Invalid argument: {}", msg.into()))
    }
}
