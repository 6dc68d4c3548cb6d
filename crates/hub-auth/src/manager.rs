//! Session state machine and change notification.
//!
//! ```text
//! Anonymous --(challenge + verification | token)--> Authenticated
//! Authenticated --(sign-out | expiry)--> Anonymous
//! ```

use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use chrono::{TimeDelta, Utc};
use hub_core::identity::Session;

use crate::error::AuthError;
use crate::gateway::{AuthGateway, AuthUser, TokenGrant};
use crate::refresh;
use crate::token_store::TokenStore;

/// Where the session manager currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Session),
}

/// A transition observers are told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
    Expired,
}

impl SessionEvent {
    /// The session after the transition, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::SignedOut | Self::Expired => None,
        }
    }
}

type Handler = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Handle returned by [`SessionManager::on_session_change`].
///
/// The handler stays registered until this is dropped or
/// [`Subscription::unsubscribe`] is called.
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Listeners>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .handlers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Owns the current session and tells observers when it changes.
pub struct SessionManager {
    gateway: Arc<dyn AuthGateway>,
    tokens: Arc<dyn TokenStore>,
    redirect_url: Option<String>,
    session: RwLock<Option<Session>>,
    listeners: Arc<Mutex<Listeners>>,
}

impl SessionManager {
    pub fn new(gateway: Arc<dyn AuthGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            gateway,
            tokens,
            redirect_url: None,
            session: RwLock::new(None),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// Where magic links should land after the user clicks them.
    #[must_use]
    pub fn with_redirect_url(mut self, redirect_url: Option<String>) -> Self {
        self.redirect_url = redirect_url;
        self
    }

    pub fn get_session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> SessionState {
        self.get_session()
            .map_or(SessionState::Anonymous, SessionState::Authenticated)
    }

    /// Where the persisted token lives, if one exists.
    pub fn token_source(&self) -> Option<&'static str> {
        self.tokens.source()
    }

    /// Register `handler` for every session transition.
    pub fn on_session_change(
        &self,
        handler: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.next_id += 1;
        let id = listeners.next_id;
        listeners.handlers.push((id, Arc::new(handler)));
        Subscription {
            id,
            registry: Arc::downgrade(&self.listeners),
        }
    }

    /// Send a sign-in message to `email`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for a blank or malformed address
    /// without contacting the auth API, or the gateway's error.
    pub async fn request_login_challenge(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        self.gateway
            .send_magic_link(email, self.redirect_url.as_deref())
            .await?;
        tracing::info!(email, "sign-in email sent");
        Ok(())
    }

    /// Complete the challenge with the one-time code from the email.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error, or `AuthError::TokenStoreError` if the
    /// new token cannot be persisted.
    pub async fn verify_login(&self, email: &str, code: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        let grant = self.gateway.verify_otp(email, code.trim()).await?;
        let session = session_from_grant(grant);
        self.tokens.store(&session.access_token)?;
        self.establish(session.clone());
        Ok(session)
    }

    /// Accept the access token carried by a magic-link redirect.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenRejected` if the auth API does not accept it.
    pub async fn complete_with_token(&self, access_token: &str) -> Result<Session, AuthError> {
        let access_token = access_token.trim();
        let user = self.gateway.get_user(access_token).await?;
        let session = session_from_user(user, access_token);
        self.tokens.store(&session.access_token)?;
        self.establish(session.clone());
        Ok(session)
    }

    /// Restore the session from the persisted token, if it is still good.
    ///
    /// A stale or rejected token is cleared and leaves the manager anonymous.
    ///
    /// # Errors
    ///
    /// Returns transport errors from the gateway; those leave the token in place.
    pub async fn rehydrate(&self) -> Result<Option<Session>, AuthError> {
        let Some(token) = self.tokens.load() else {
            return Ok(None);
        };

        if refresh::is_stale(&token) {
            tracing::warn!("stored token has expired; sign in again");
            self.discard_token();
            return Ok(None);
        }

        match self.gateway.get_user(&token).await {
            Ok(user) => {
                let session = session_from_user(user, &token);
                self.establish(session.clone());
                Ok(Some(session))
            }
            Err(AuthError::TokenRejected) => {
                tracing::warn!("stored token was rejected; sign in again");
                self.discard_token();
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// End the session locally and remotely, and forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the stored token cannot be removed.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let previous = self.take_session();
        if let Some(session) = &previous {
            if let Err(error) = self.gateway.sign_out(&session.access_token).await {
                tracing::warn!(%error, "remote sign-out failed");
            }
        }
        self.tokens.delete()?;
        if previous.is_some() {
            tracing::info!("signed out");
            self.notify(&SessionEvent::SignedOut);
        }
        Ok(())
    }

    /// The session ended outside this process (token expiry, revocation).
    pub fn expire(&self) {
        if self.take_session().is_some() {
            self.discard_token();
            tracing::info!("session expired");
            self.notify(&SessionEvent::Expired);
        }
    }

    fn establish(&self, session: Session) {
        tracing::info!(user_id = %session.user_id, "signed in");
        *self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        self.notify(&SessionEvent::SignedIn(session));
    }

    fn take_session(&self) -> Option<Session> {
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn discard_token(&self) {
        if let Err(error) = self.tokens.delete() {
            tracing::warn!(%error, "failed to clear stored token");
        }
    }

    fn notify(&self, event: &SessionEvent) {
        let handlers: Vec<Handler> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(event);
        }
    }
}

fn session_from_grant(grant: TokenGrant) -> Session {
    let expires_at = grant
        .expires_in
        .map(|secs| Utc::now() + TimeDelta::seconds(secs))
        .or_else(|| refresh::decode_expiry(&grant.access_token).ok());
    Session {
        user_id: grant.user.id,
        email: grant.user.email,
        access_token: grant.access_token,
        refresh_token: grant.refresh_token,
        expires_at,
    }
}

fn session_from_user(user: AuthUser, access_token: &str) -> Session {
    Session {
        user_id: user.id,
        email: user.email,
        access_token: access_token.to_string(),
        refresh_token: None,
        expires_at: refresh::decode_expiry(access_token).ok(),
    }
}
