//! Error types for the Bookscout plugin.
//!
//! This module defines the centralized error type [`BookscoutError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Almost none of these errors reach the user. The fetch boundary turns request and
//! decode failures into an empty result set plus a log line, and the plugin shim logs
//! any error returned from event handling and keeps running.

use thiserror::Error;

/// The main error type for Bookscout plugin operations.
///
/// # Examples
///
/// ```
/// use bookscout::domain::BookscoutError;
///
/// fn validate_query(query: &str) -> Result<(), BookscoutError> {
///     if query.trim().is_empty() {
///         return Err(BookscoutError::EmptyQuery);
///     }
///     Ok(())
/// }
///
/// assert!(validate_query("   ").is_err());
/// ```
#[derive(Debug, Error)]
pub enum BookscoutError {
    /// The search query was empty or contained only whitespace.
    ///
    /// Rejected before any request is issued.
    #[error("search query cannot be empty")]
    EmptyQuery,

    /// The books endpoint answered with a non-success HTTP status.
    #[error("HTTP error: status {status}")]
    Http {
        /// Status code returned by the host transport.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response body was JSON but not shaped like a volumes payload.
    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Bookscout operations.
pub type Result<T> = std::result::Result<T, BookscoutError>;
