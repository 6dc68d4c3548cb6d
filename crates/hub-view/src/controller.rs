//! The link list controller.
//!
//! Owns the authoritative in-memory list. Local state only ever changes to
//! rows the store has confirmed: a failed call leaves the list untouched.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use hub_auth::SessionEvent;
use hub_codec::decode_csv;
use hub_core::entities::{AuditEvent, LinkPatch, LinkRecord, NewLink};
use hub_core::enums::AuditAction;
use hub_core::identity::SessionContext;
use hub_core::record::{is_persistable, validate};
use hub_search::{Facets, FilterState, filter_links};
use hub_store::LinkStore;
use serde::Serialize;

use crate::aliases::resolve_row;
use crate::error::HubError;
use crate::export::{ExportTarget, csv_text, json_text, write_file};
use crate::form::LinkForm;

/// Asks the user to confirm a destructive action.
pub trait Confirm: Sync {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool + Sync> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Outcome of a CSV import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Rows sent to the store.
    pub submitted: usize,
    /// Rows dropped for a missing title or url.
    pub skipped: usize,
    /// Rows the store confirmed.
    pub inserted: usize,
}

pub struct LinkController {
    store: Arc<dyn LinkStore>,
    ctx: SessionContext,
    links: Vec<LinkRecord>,
    export: ExportTarget,
}

impl LinkController {
    pub fn new(store: Arc<dyn LinkStore>, ctx: SessionContext, export: ExportTarget) -> Self {
        store.set_access_token(ctx.access_token());
        Self {
            store,
            ctx,
            links: Vec::new(),
            export,
        }
    }

    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub const fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Whether admin actions should be offered. The store enforces the rest.
    pub fn can_admin(&self) -> bool {
        self.ctx.can_admin()
    }

    /// Refuse `action` unless the current profile is an admin.
    ///
    /// # Errors
    ///
    /// Returns `HubError::NotAdmin` naming the refused action.
    pub fn require_admin(&self, action: &'static str) -> Result<(), HubError> {
        if self.can_admin() {
            Ok(())
        } else {
            Err(HubError::NotAdmin(action))
        }
    }

    pub fn find(&self, id: &str) -> Option<&LinkRecord> {
        self.links.iter().find(|link| link.id == id)
    }

    fn require(&self, id: &str) -> Result<&LinkRecord, HubError> {
        self.find(id)
            .ok_or_else(|| HubError::NotFound(id.to_string()))
    }

    fn replace(&mut self, record: LinkRecord) {
        if let Some(slot) = self.links.iter_mut().find(|link| link.id == record.id) {
            *slot = record;
        }
    }

    async fn audit(&self, action: AuditAction, link_id: &str) {
        let by = self.ctx.actor_email().map(str::to_string);
        self.store
            .append_audit(&AuditEvent::new(action, link_id, by))
            .await;
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// Follow a session transition: swap identity, refetch profile and list.
    ///
    /// # Errors
    ///
    /// Returns the store error from the reload; the identity change sticks.
    pub async fn handle_session_event(&mut self, event: &SessionEvent) -> Result<(), HubError> {
        match event.session() {
            Some(session) => {
                self.store.set_access_token(Some(&session.access_token));
                let profile = match self.store.fetch_profile(&session.user_id).await {
                    Ok(profile) => profile,
                    Err(error) => {
                        tracing::warn!(%error, "profile lookup failed; continuing without role");
                        None
                    }
                };
                self.ctx = SessionContext::new(Some(session.clone()), profile);
            }
            None => {
                self.store.set_access_token(None);
                self.ctx = SessionContext::anonymous();
                self.links.clear();
            }
        }
        self.load().await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Replace the list with the store's current rows.
    ///
    /// # Errors
    ///
    /// Returns the store error and keeps the previous list.
    pub async fn load(&mut self) -> Result<(), HubError> {
        self.links = self.store.list_links().await?;
        tracing::debug!(count = self.links.len(), "links loaded");
        Ok(())
    }

    pub fn visible(&self, filter: &FilterState) -> Vec<&LinkRecord> {
        filter_links(&self.links, filter)
    }

    pub fn facets(&self) -> Facets {
        Facets::derive(&self.links)
    }

    /// The url to copy or encode as a QR code.
    ///
    /// # Errors
    ///
    /// Returns `HubError::NotFound` if `id` is not in the list.
    pub fn share(&self, id: &str) -> Result<&str, HubError> {
        Ok(self.require(id)?.url.as_str())
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a new link and put it at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Validation` for a blank title or url (nothing is
    /// sent), or the store error.
    pub async fn create(&mut self, form: LinkForm) -> Result<LinkRecord, HubError> {
        let draft = form.into_draft();
        validate(&draft)?;
        let new_link = NewLink::new(draft, self.ctx.user_id().map(str::to_string));
        let record = self.store.insert_link(&new_link).await?;
        self.links.insert(0, record.clone());
        self.audit(AuditAction::Create, &record.id).await;
        tracing::info!(id = %record.id, "link created");
        Ok(record)
    }

    /// Overwrite the editable fields of `id`.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Validation` for a blank title or url (nothing is
    /// sent), `HubError::NotFound`, or the store error.
    pub async fn update(&mut self, id: &str, form: LinkForm) -> Result<LinkRecord, HubError> {
        let draft = form.into_draft();
        validate(&draft)?;
        let patch = LinkPatch::from_draft(draft, Utc::now());
        let record = self.store.update_link(id, &patch).await?;
        self.replace(record.clone());
        self.audit(AuditAction::Update, id).await;
        tracing::info!(id, "link updated");
        Ok(record)
    }

    /// Flip the favorite flag of `id`.
    ///
    /// # Errors
    ///
    /// Returns `HubError::NotFound` if `id` is not loaded, or the store error.
    pub async fn toggle_favorite(&mut self, id: &str) -> Result<LinkRecord, HubError> {
        let favorite = !self.require(id)?.favorite;
        let record = self
            .store
            .update_link(id, &LinkPatch::favorite(favorite))
            .await?;
        self.replace(record.clone());
        Ok(record)
    }

    /// Delete `id` after the user confirms. Returns whether it was deleted.
    ///
    /// # Errors
    ///
    /// Returns `HubError::NotFound` if `id` is not loaded, or the store error.
    /// A declined confirmation is `Ok(false)`.
    pub async fn delete(&mut self, id: &str, confirmer: &dyn Confirm) -> Result<bool, HubError> {
        let title = self.require(id)?.title.clone();
        if !confirmer.confirm(&format!("Delete \"{title}\"?")) {
            return Ok(false);
        }
        self.store.delete_link(id).await?;
        self.links.retain(|link| link.id != id);
        self.audit(AuditAction::Delete, id).await;
        tracing::info!(id, "link deleted");
        Ok(true)
    }

    /// Count one open of `id`. Failures are logged, never returned.
    pub async fn record_click(&mut self, id: &str) {
        let Some(current) = self.find(id).map(|link| link.clicks) else {
            tracing::warn!(id, "click on a link that is not loaded");
            return;
        };
        match self
            .store
            .update_link(id, &LinkPatch::clicks(current.saturating_add(1)))
            .await
        {
            Ok(record) => {
                self.replace(record);
                self.audit(AuditAction::Clicked, id).await;
            }
            Err(error) => tracing::warn!(id, %error, "failed to record click"),
        }
    }

    /// Import CSV text in a single batch insert.
    ///
    /// Rows without a title or url are skipped. Nothing is sent when no row
    /// survives.
    ///
    /// # Errors
    ///
    /// Returns the store error; the list is unchanged in that case.
    pub async fn import_batch(&mut self, raw_csv: &str) -> Result<ImportReport, HubError> {
        let rows = decode_csv(raw_csv);
        let created_by = self.ctx.user_id().map(str::to_string);
        let new_links: Vec<NewLink> = rows
            .iter()
            .map(resolve_row)
            .filter(is_persistable)
            .map(|draft| NewLink::new(draft, created_by.clone()))
            .collect();

        let mut report = ImportReport {
            submitted: new_links.len(),
            skipped: rows.len() - new_links.len(),
            inserted: 0,
        };
        if new_links.is_empty() {
            tracing::info!(skipped = report.skipped, "nothing to import");
            return Ok(report);
        }

        let inserted = self.store.insert_many(&new_links).await?;
        report.inserted = inserted.len();
        self.links.splice(0..0, inserted);
        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "import finished"
        );
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    pub fn export_target(&self) -> &ExportTarget {
        &self.export
    }

    /// Send later exports to `dir`, keeping the configured file names.
    pub fn set_export_dir(&mut self, dir: impl Into<PathBuf>) {
        self.export = std::mem::take(&mut self.export).in_dir(dir);
    }

    /// Write the full list as CSV and return the file path.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Write` if the file cannot be written.
    pub fn export_csv(&self) -> Result<PathBuf, HubError> {
        let path = self.export.csv_path();
        write_file(&path, &csv_text(&self.links))?;
        tracing::info!(path = %path.display(), count = self.links.len(), "exported CSV");
        Ok(path)
    }

    /// Write the full list as pretty JSON and return the file path.
    ///
    /// # Errors
    ///
    /// Returns `HubError::Codec` or `HubError::Write`.
    pub fn export_json(&self) -> Result<PathBuf, HubError> {
        let path = self.export.json_path();
        write_file(&path, &json_text(&self.links)?)?;
        tracing::info!(path = %path.display(), count = self.links.len(), "exported JSON");
        Ok(path)
    }
}
