//! # hub-store
//!
//! The remote store gateway for Link Hub.
//!
//! [`LinkStore`] is the seam between the controller and whatever holds the
//! `links`, `profiles` and `audit_logs` tables. Two implementations ship:
//! - [`PostgrestStore`] talks to a Supabase project over its REST API
//! - [`MemoryStore`] keeps everything in-process (tests, offline demos)
//!
//! Every call is a single round-trip; nothing spans calls.

mod error;
mod http;
mod memory;
mod postgrest;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

use async_trait::async_trait;
use hub_core::entities::{AuditEvent, LinkPatch, LinkRecord, NewLink, Profile};

/// Gateway to the remote link tables.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// All visible links, most recently updated first.
    async fn list_links(&self) -> Result<Vec<LinkRecord>, StoreError>;

    /// Insert one link and return the stored row.
    async fn insert_link(&self, link: &NewLink) -> Result<LinkRecord, StoreError>;

    /// Insert a batch in one call. All rows land or none do.
    async fn insert_many(&self, links: &[NewLink]) -> Result<Vec<LinkRecord>, StoreError>;

    /// Apply `patch` to the link `id` and return the updated row.
    async fn update_link(&self, id: &str, patch: &LinkPatch) -> Result<LinkRecord, StoreError>;

    async fn delete_link(&self, id: &str) -> Result<(), StoreError>;

    /// Append an audit event. Failures are logged and swallowed.
    async fn append_audit(&self, event: &AuditEvent);

    /// The profile row for `user_id`, if one is visible.
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;

    /// Switch the identity used for subsequent calls. `None` means anonymous.
    fn set_access_token(&self, _token: Option<&str>) {}
}
