//! Store error types.

use hub_core::errors::CoreError;
use thiserror::Error;

/// Errors from link store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The target row does not exist (or is hidden by row-level security).
    #[error("link not found: {0}")]
    NotFound(String),

    /// The store rejected the row (blank title/url, constraint violation).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The store API returned a non-success status code.
    #[error("store API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Store-provided message or raw response body.
        message: String,
    },

    /// HTTP transport or body decoding error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response was well-formed but not what the operation expects.
    #[error("unexpected store response: {0}")]
    Unexpected(String),

    /// The store could not be reached or refused to serve the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
        }
    }
}
