//! # hub-codec
//!
//! Text codecs for Link Hub import/export.
//!
//! - [`csv`]: flat key-value rows to and from quoted CSV text. Every value is
//!   text; no type coercion happens here and header aliases are left to the
//!   caller.
//! - [`json`]: direct structural serialization of record sequences.

pub mod csv;
mod error;
pub mod json;

pub use csv::{CsvRow, decode_csv, encode_csv};
pub use error::CodecError;
pub use json::{decode_json, encode_json};
