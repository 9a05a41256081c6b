//! Error types for the Estoc library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`EstocError`] enum. Transport failures, non-success responses from the
//! cluster, decoding problems and failed case expectations each get their own
//! variant so callers can tell them apart.
//!
//! # Examples
//!
//! ```
//! use estoc::error::{EstocError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(EstocError::config("cluster url is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Estoc operations.
#[derive(Error, Debug)]
pub enum EstocError {
    /// I/O errors (config files, terminal output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport errors (connection refused, timeouts, bad bodies)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The cluster answered with a non-success status code
    #[error("Cluster returned {status}: {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error type and reason reported by the cluster, or the raw body.
        reason: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query construction errors
    #[error("Query error: {0}")]
    Query(String),

    /// Response decoding errors
    #[error("Decode error: {0}")]
    Decode(String),

    /// Fixture seeding or teardown errors
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// A case expectation did not hold
    #[error("Expectation failed: {0}")]
    Expectation(String),

    /// A named case or collection does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with EstocError.
pub type Result<T> = std::result::Result<T, EstocError>;

impl EstocError {
    /// Create a new status error.
    pub fn status<S: Into<String>>(status: u16, reason: S) -> Self {
        EstocError::Status {
            status,
            reason: reason.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EstocError::Config(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        EstocError::Query(msg.into())
    }

    /// Create a new decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        EstocError::Decode(msg.into())
    }

    /// Create a new fixture error.
    pub fn fixture<S: Into<String>>(msg: S) -> Self {
        EstocError::Fixture(msg.into())
    }

    /// Create a new expectation error.
    pub fn expectation<S: Into<String>>(msg: S) -> Self {
        EstocError::Expectation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        EstocError::Other(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        EstocError::NotFound(msg.into())
    }

    /// Check whether the cluster reported the given status code.
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, EstocError::Status { status, .. } if *status == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = EstocError::config("missing url");
        assert_eq!(error.to_string(), "Configuration error: missing url");

        let error = EstocError::expectation("expected 10 hits, got 9");
        assert_eq!(
            error.to_string(),
            "Expectation failed: expected 10 hits, got 9"
        );

        let error = EstocError::status(404, "index_not_found_exception");
        assert_eq!(
            error.to_string(),
            "Cluster returned 404: index_not_found_exception"
        );
        assert!(error.is_status(404));
        assert!(!error.is_status(400));
    }

    #[test]
    fn test_not_found_keeps_its_variant() {
        let error = EstocError::not_found("case 'no-such-case'");
        assert!(matches!(error, EstocError::NotFound(_)));
        assert_eq!(error.to_string(), "Not found: case 'no-such-case'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let estoc_error = EstocError::from(io_error);

        match estoc_error {
            EstocError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(EstocError::from(json_error), EstocError::Json(_)));
    }
}
