use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::AuditAction;

/// An append-only audit event. The store assigns the timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub link_id: String,
    /// Email of the acting session, if any.
    pub by: Option<String>,
}

impl AuditEvent {
    #[must_use]
    pub fn new(action: AuditAction, link_id: impl Into<String>, by: Option<String>) -> Self {
        Self {
            action,
            link_id: link_id.into(),
            by,
        }
    }
}
