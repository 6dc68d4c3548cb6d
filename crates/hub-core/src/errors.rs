//! Cross-cutting error types for Link Hub.
//!
//! Domain-specific errors (e.g., `StoreError`, `AuthError`) are defined in
//! their respective crates. The unified `HubError` lives in `hub-view` where
//! the controller converges them.

use thiserror::Error;

/// Errors that can be raised by any Link Hub crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A draft failed local validation before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),
}
