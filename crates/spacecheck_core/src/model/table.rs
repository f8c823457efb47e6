//! Raw source-table shape handed to the normalizer.
//!
//! # Responsibility
//! - Describe the loader's output: a header row plus row-records keyed by
//!   header column name.
//! - Degrade gracefully when `header` or `data` is missing from the input.
//!
//! # Invariants
//! - Columns 1-3 are `category`/`project`/`note` metadata, the last column
//!   is ignored, and every column in between denotes a base space.

use serde::Deserialize;
use serde_json::Value;

/// Fixed metadata column: informational category label.
pub const COL_CATEGORY: &str = "category";
/// Fixed metadata column: item name.
pub const COL_PROJECT: &str = "project";
/// Fixed metadata column: free-text note.
pub const COL_NOTE: &str = "note";

/// One row of the source table, keyed by header column name.
///
/// Space-column cells carry arbitrary JSON values; a truthy value marks the
/// row as belonging to that space.
pub type SourceRecord = serde_json::Map<String, Value>;

/// Raw tabular input as produced by the external dataset loader.
///
/// Both fields default to empty so that an input lacking `header` or `data`
/// deserializes cleanly and normalizes to an empty model instead of failing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceTable {
    #[serde(default)]
    pub header: Vec<String>,
    #[serde(default)]
    pub data: Vec<SourceRecord>,
}

impl SourceTable {
    /// Parses a source table from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
