//! Entity structs for all Link Hub domain objects.
//!
//! Each entity maps to a table in the remote store (`links`, `profiles`,
//! `audit_logs`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod audit;
mod link;
mod profile;

pub use audit::AuditEvent;
pub use link::{LinkDraft, LinkPatch, LinkRecord, NewLink};
pub use profile::Profile;
