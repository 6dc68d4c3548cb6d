//! # hub-view
//!
//! Orchestrates the link list: load, create, update, delete, favorite,
//! click tracking, CSV import and CSV/JSON export.
//!
//! [`LinkController`] is the only writer of the in-memory list. It talks to
//! the store through [`hub_store::LinkStore`], reads identity from an explicit
//! [`hub_core::identity::SessionContext`], and converges every failure into
//! [`HubError`]. [`SessionFeed`] carries session transitions from the
//! session manager to the controller.

pub mod aliases;
mod controller;
mod error;
pub mod export;
mod form;
mod session_feed;

pub use controller::{Confirm, ImportReport, LinkController};
pub use error::HubError;
pub use export::ExportTarget;
pub use form::LinkForm;
pub use session_feed::SessionFeed;
