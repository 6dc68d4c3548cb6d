//! # hub-search
//!
//! Derives what the link list shows from the full record set:
//! - [`filter_links`] applies the text query and facet selections (AND-combined)
//! - [`Facets::derive`] collects the distinct categories, locations and tags
//!
//! Everything here is a pure function of its inputs and is recomputed on
//! every change; nothing is cached or indexed.

mod facets;
mod filter;

pub use facets::Facets;
pub use filter::{FilterState, filter_links, matches};
