use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Profile;

/// An authenticated session against the remote store.
///
/// Produced by `hub-auth`, consumed by `hub-store` (bearer token) and
/// `hub-view` (actor identity for audit events).
#[derive(Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    /// Store user ID (JWT `sub` claim).
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Read-only view of the current session and its profile.
///
/// Owned by whoever drives the session manager and passed by reference to
/// the controller, so tests can hand in a fake identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub session: Option<Session>,
    pub profile: Option<Profile>,
}

impl SessionContext {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            session: None,
            profile: None,
        }
    }

    #[must_use]
    pub const fn new(session: Option<Session>, profile: Option<Profile>) -> Self {
        Self { session, profile }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Whether admin-only actions should be offered.
    #[must_use]
    pub fn can_admin(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.role.is_admin())
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }

    /// Email recorded as the actor of audit events.
    #[must_use]
    pub fn actor_email(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.email.as_deref())
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }
}
