//! # hub-core
//!
//! Core types, record predicates, and error types for Link Hub.
//!
//! This crate provides the foundational types shared across all Link Hub crates:
//! - Entity structs exchanged with the remote store (links, profiles, audit events)
//! - Draft and patch shapes for writes
//! - Role and audit action enums
//! - Session identity and the read-only session context handed to the controller
//! - The `is_persistable` and `normalize_tags` predicates
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod record;
