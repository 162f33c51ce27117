//! Error types for the hostfold client

use hostfold_core::InventoryError;
use thiserror::Error;

/// Errors that can occur while fetching and reading a state document
#[derive(Error, Debug)]
pub enum ClientError {
    /// Required input missing or invalid (caller bug, not retryable)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network-level failure talking to the endpoint
    #[error("transport error for {endpoint}: {source}")]
    Transport {
        /// URL that was requested
        endpoint: String,
        /// Underlying cause
        #[source]
        source: reqwest::Error,
    },

    /// Endpoint answered with a non-2xx status
    #[error("unexpected status {status} from {endpoint}: {body}")]
    UnexpectedStatus {
        /// URL that was requested
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body, truncated if large
        body: String,
    },

    /// Response body is not a JSON document
    #[error(transparent)]
    MalformedDocument(#[from] InventoryError),
}

impl ClientError {
    /// Check if error is retryable
    ///
    /// Transport failures are retryable. Status errors are only reported as
    /// retryable for 408, 429 and 5xx.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport { .. } => true,
            ClientError::UnexpectedStatus { status, .. } => {
                matches!(*status, 408 | 429 | 500..=599)
            }
            ClientError::Configuration(_) | ClientError::MalformedDocument(_) => false,
        }
    }

    /// HTTP status code, if the endpoint answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
