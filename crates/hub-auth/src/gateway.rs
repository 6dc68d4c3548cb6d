//! The auth API seam and its Supabase (GoTrue) implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::AuthError;

/// The identity the auth API reports for a token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens issued when a sign-in challenge is completed.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of `access_token` in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

/// Passwordless auth operations the session manager relies on.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Send a one-time sign-in message to `email`.
    async fn send_magic_link(&self, email: &str, redirect_to: Option<&str>)
    -> Result<(), AuthError>;

    /// Exchange the one-time code from the message for tokens.
    async fn verify_otp(&self, email: &str, code: &str) -> Result<TokenGrant, AuthError>;

    /// Resolve the user behind `access_token`.
    ///
    /// Returns `AuthError::TokenRejected` when the token is invalid or expired.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;

    /// Revoke `access_token` remotely.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default, alias = "error_description", alias = "message")]
    msg: Option<String>,
}

/// [`AuthGateway`] backed by the `/auth/v1` API of a Supabase project.
pub struct SupabaseAuth {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
}

impl std::fmt::Debug for SupabaseAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuth")
            .field("auth_url", &self.auth_url)
            .finish_non_exhaustive()
    }
}

impl SupabaseAuth {
    /// Create a client for `auth_url` (e.g. `https://abcd.supabase.co/auth/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Http`] if the underlying client cannot be built.
    pub fn new(
        auth_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .user_agent("linkhub/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            auth_url: auth_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}/{path}", self.auth_url))
            .header("apikey", &self.anon_key)
    }

    async fn api_error(resp: reqwest::Response) -> AuthError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let parsed: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();
        AuthError::Api {
            status,
            message: parsed.msg.unwrap_or(body),
        }
    }
}

#[async_trait]
impl AuthGateway for SupabaseAuth {
    async fn send_magic_link(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), AuthError> {
        let path = match redirect_to {
            Some(url) => format!("otp?redirect_to={}", urlencoding::encode(url)),
            None => "otp".to_string(),
        };
        let resp = self.post(&path).json(&json!({ "email": email })).send().await?;
        if !resp.status().is_success() {
            return Err(AuthError::ChallengeFailed(
                Self::api_error(resp).await.to_string(),
            ));
        }
        Ok(())
    }

    async fn verify_otp(&self, email: &str, code: &str) -> Result<TokenGrant, AuthError> {
        let resp = self
            .post("verify")
            .json(&json!({ "type": "email", "email": email, "token": code }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AuthError::VerificationFailed(
                Self::api_error(resp).await.to_string(),
            ));
        }
        Ok(resp.json().await?)
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let resp = self
            .http
            .get(format!("{}/user", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        match resp.status().as_u16() {
            200..=299 => Ok(resp.json().await?),
            401 | 403 => Err(AuthError::TokenRejected),
            _ => Err(Self::api_error(resp).await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let resp = self.post("logout").bearer_auth(access_token).send().await?;
        if !resp.status().is_success() {
            return Err(Self::api_error(resp).await);
        }
        Ok(())
    }
}
