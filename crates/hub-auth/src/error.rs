use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in — run `linkhub auth login <email>`")]
    NotAuthenticated,

    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("could not send sign-in email: {0}")]
    ChallengeFailed(String),

    #[error("sign-in code rejected: {0}")]
    VerificationFailed(String),

    #[error("stored session was rejected — sign in again")]
    TokenRejected,

    #[error("auth API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}
