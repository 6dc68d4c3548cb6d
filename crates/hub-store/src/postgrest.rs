//! REST client for the Supabase table API.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use hub_core::entities::{AuditEvent, LinkPatch, LinkRecord, NewLink, Profile};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::LinkStore;
use crate::error::StoreError;
use crate::http::check_response;

const LINK_COLUMNS: &str =
    "id,title,url,description,category,location,tags,favorite,clicks,created_by,created_at,updated_at";
const PROFILE_COLUMNS: &str = "id,email,role,full_name,created_at";

const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";

/// [`LinkStore`] backed by the `/rest/v1` API of a Supabase project.
///
/// Calls carry the anon key as `apikey` and, once a session exists, the
/// user's access token as the bearer. Without a session the anon key is the
/// bearer and row-level security decides what is visible.
pub struct PostgrestStore {
    http: reqwest::Client,
    rest_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl std::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("rest_url", &self.rest_url)
            .finish_non_exhaustive()
    }
}

impl PostgrestStore {
    /// Create a client for `rest_url` (e.g. `https://abcd.supabase.co/rest/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying client cannot be built.
    pub fn new(
        rest_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent("linkhub/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            rest_url: rest_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: RwLock::new(None),
        })
    }

    fn bearer(&self) -> String {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    fn request(&self, method: Method, path_and_query: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{path_and_query}", self.rest_url);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
    }

    async fn send_rows<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Vec<T>, StoreError> {
        let resp = check_response(builder.send().await?).await?;
        Ok(resp.json().await?)
    }

    fn by_id(table: &str, id: &str) -> String {
        format!("{table}?id=eq.{}", urlencoding::encode(id))
    }
}

#[async_trait]
impl LinkStore for PostgrestStore {
    async fn list_links(&self) -> Result<Vec<LinkRecord>, StoreError> {
        tracing::debug!("listing links");
        let path = format!("links?select={LINK_COLUMNS}&order=updated_at.desc");
        self.send_rows(self.request(Method::GET, &path)).await
    }

    async fn insert_link(&self, link: &NewLink) -> Result<LinkRecord, StoreError> {
        tracing::debug!(title = %link.draft.title, "inserting link");
        let rows: Vec<LinkRecord> = self
            .send_rows(
                self.request(Method::POST, &format!("links?select={LINK_COLUMNS}"))
                    .header("Prefer", RETURN_REPRESENTATION)
                    .json(link),
            )
            .await?;
        let count = rows.len();
        match <[LinkRecord; 1]>::try_from(rows) {
            Ok([record]) => Ok(record),
            Err(_) => Err(StoreError::Unexpected(format!(
                "insert returned {count} rows, expected 1"
            ))),
        }
    }

    async fn insert_many(&self, links: &[NewLink]) -> Result<Vec<LinkRecord>, StoreError> {
        if links.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(count = links.len(), "inserting link batch");
        let rows: Vec<LinkRecord> = self
            .send_rows(
                self.request(Method::POST, &format!("links?select={LINK_COLUMNS}"))
                    .header("Prefer", RETURN_REPRESENTATION)
                    .json(links),
            )
            .await?;
        if rows.len() != links.len() {
            return Err(StoreError::Unexpected(format!(
                "batch insert returned {} rows, expected {}",
                rows.len(),
                links.len()
            )));
        }
        Ok(rows)
    }

    async fn update_link(&self, id: &str, patch: &LinkPatch) -> Result<LinkRecord, StoreError> {
        tracing::debug!(id, "updating link");
        let path = format!("{}&select={LINK_COLUMNS}", Self::by_id("links", id));
        let rows: Vec<LinkRecord> = self
            .send_rows(
                self.request(Method::PATCH, &path)
                    .header("Prefer", RETURN_REPRESENTATION)
                    .json(patch),
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete_link(&self, id: &str) -> Result<(), StoreError> {
        tracing::debug!(id, "deleting link");
        let path = format!("{}&select=id", Self::by_id("links", id));
        let rows: Vec<serde_json::Value> = self
            .send_rows(
                self.request(Method::DELETE, &path)
                    .header("Prefer", RETURN_REPRESENTATION),
            )
            .await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn append_audit(&self, event: &AuditEvent) {
        let result = async {
            let resp = self
                .request(Method::POST, "audit_logs")
                .header("Prefer", RETURN_MINIMAL)
                .json(event)
                .send()
                .await?;
            check_response(resp).await.map(drop)
        }
        .await;
        if let Err(error) = result {
            tracing::warn!(action = %event.action, link_id = %event.link_id, %error, "audit append failed");
        }
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        tracing::debug!(user_id, "fetching profile");
        let path = format!(
            "{}&select={PROFILE_COLUMNS}",
            Self::by_id("profiles", user_id)
        );
        let rows: Vec<Profile> = self.send_rows(self.request(Method::GET, &path)).await?;
        Ok(rows.into_iter().next())
    }

    fn set_access_token(&self, token: Option<&str>) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token.map(str::to_string);
    }
}
