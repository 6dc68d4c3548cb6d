//! The error kinds surfaced to whoever drives the controller.

use std::path::PathBuf;

use hub_auth::AuthError;
use hub_codec::CodecError;
use hub_config::ConfigError;
use hub_core::errors::CoreError;
use hub_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    /// The store is not configured; no data operations are available.
    #[error("store not configured: {0}")]
    Configuration(#[from] ConfigError),

    /// A draft failed local checks; nothing was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A remote call failed; local state is unchanged.
    #[error(transparent)]
    Store(StoreError),

    /// The target is gone remotely or was never loaded; reload the list.
    #[error("link not found: {0}")]
    NotFound(String),

    /// The current profile is not allowed to perform the action.
    #[error("only admins can {0}")]
    NotAdmin(&'static str),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<StoreError> for HubError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Validation(msg) => Self::Validation(msg),
            other => Self::Store(other),
        }
    }
}

impl From<CoreError> for HubError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
        }
    }
}
