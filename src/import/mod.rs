//! Importers that build document trees from external descriptions.
//!
//! Only JSON is supported; see [`json`] for the format.

pub mod json;

use std::path::Path;

pub use json::{Document, from_json};

use crate::error::Result;

/// Read and parse a JSON document description from `path`.
pub fn open(path: impl AsRef<Path>) -> Result<Document> {
    let text = std::fs::read_to_string(path)?;
    from_json(&text)
}
