//! Error types for hostfold-core

use thiserror::Error;

/// Errors that can occur while reading a state document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The state document body is not valid JSON
    #[error("malformed state document: {message}")]
    MalformedDocument {
        /// Line of the first syntax error (1-based)
        line: usize,
        /// Column of the first syntax error (1-based)
        column: usize,
        /// Parser message
        message: String,
    },
}

impl InventoryError {
    /// Check if error is retryable
    ///
    /// A malformed document points at a server or version mismatch, so
    /// fetching it again will not help.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::MalformedDocument {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
