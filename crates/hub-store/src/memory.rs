//! In-process [`LinkStore`] with the same contract as the remote one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use hub_core::entities::{AuditEvent, LinkPatch, LinkRecord, NewLink, Profile};
use hub_core::record::validate;

use crate::LinkStore;
use crate::error::StoreError;

pub const LINK_ID_PREFIX: &str = "lnk-";

#[derive(Debug, Default)]
struct State {
    links: Vec<LinkRecord>,
    profiles: Vec<Profile>,
    audit: Vec<AuditEvent>,
    fail_next: Option<String>,
    access_token: Option<String>,
}

/// Mutex-guarded store for tests and offline use.
///
/// New rows go to the front, so rows sharing an `updated_at` still list
/// newest first. [`MemoryStore::fail_next`] makes the next fallible call
/// return [`StoreError::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `links` and `profiles`.
    #[must_use]
    pub fn seeded(links: Vec<LinkRecord>, profiles: Vec<Profile>) -> Self {
        Self {
            state: Mutex::new(State {
                links,
                profiles,
                ..State::default()
            }),
        }
    }

    /// Make the next fallible call fail with `reason`.
    pub fn fail_next(&self, reason: impl Into<String>) {
        self.lock().fail_next = Some(reason.into());
    }

    /// Audit events appended so far, oldest first.
    #[must_use]
    pub fn audit_events(&self) -> Vec<AuditEvent> {
        self.lock().audit.clone()
    }

    /// Snapshot of the stored rows in storage order.
    #[must_use]
    pub fn links(&self) -> Vec<LinkRecord> {
        self.lock().links.clone()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.lock().access_token.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock and consume a pending injected failure.
    fn begin(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        let mut state = self.lock();
        match state.fail_next.take() {
            Some(reason) => Err(StoreError::Unavailable(reason)),
            None => Ok(state),
        }
    }
}

fn generate_id() -> Result<String, StoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|e| StoreError::Unavailable(format!("failed to generate id: {e}")))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{LINK_ID_PREFIX}{hex}"))
}

fn materialize(link: &NewLink) -> Result<LinkRecord, StoreError> {
    validate(&link.draft)?;
    let now = Utc::now();
    let draft = link.draft.clone();
    Ok(LinkRecord {
        id: generate_id()?,
        title: draft.title,
        url: draft.url,
        description: draft.description,
        category: draft.category,
        location: draft.location,
        tags: draft.tags,
        favorite: link.favorite,
        clicks: link.clicks,
        created_by: link.created_by.clone(),
        created_at: now,
        updated_at: now,
    })
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn list_links(&self) -> Result<Vec<LinkRecord>, StoreError> {
        let mut links = self.begin()?.links.clone();
        links.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(links)
    }

    async fn insert_link(&self, link: &NewLink) -> Result<LinkRecord, StoreError> {
        let mut state = self.begin()?;
        let record = materialize(link)?;
        state.links.insert(0, record.clone());
        Ok(record)
    }

    async fn insert_many(&self, links: &[NewLink]) -> Result<Vec<LinkRecord>, StoreError> {
        let mut state = self.begin()?;
        let records = links
            .iter()
            .map(materialize)
            .collect::<Result<Vec<_>, _>>()?;
        state.links.splice(0..0, records.iter().cloned());
        Ok(records)
    }

    async fn update_link(&self, id: &str, patch: &LinkPatch) -> Result<LinkRecord, StoreError> {
        let mut state = self.begin()?;
        let record = state
            .links
            .iter_mut()
            .find(|link| link.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut updated = record.clone();
        patch.apply_to(&mut updated);
        if updated.title.trim().is_empty() || updated.url.trim().is_empty() {
            return Err(StoreError::Validation("title and url are required".into()));
        }
        if patch.updated_at.is_none() {
            updated.updated_at = Utc::now();
        }
        *record = updated.clone();
        Ok(updated)
    }

    async fn delete_link(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.begin()?;
        let before = state.links.len();
        state.links.retain(|link| link.id != id);
        if state.links.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn append_audit(&self, event: &AuditEvent) {
        match self.begin() {
            Ok(mut state) => state.audit.push(event.clone()),
            Err(error) => {
                tracing::warn!(action = %event.action, link_id = %event.link_id, %error, "audit append failed");
            }
        }
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let state = self.begin()?;
        Ok(state.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    fn set_access_token(&self, token: Option<&str>) {
        self.lock().access_token = token.map(str::to_string);
    }
}
