//! Persisted snapshot shapes.
//!
//! # Responsibility
//! - Define the in-memory header/item model owned by the store.
//! - Define the two durable blobs: the full store snapshot and the
//!   point-in-time export snapshot.
//!
//! # Invariants
//! - Snapshots are read and written whole; there are no partial writes.
//! - `StoreSnapshot.version` gates loading: a mismatch is treated as
//!   "no snapshot" so a future shape change can never be misread.

use crate::model::header::HeaderEntry;
use crate::model::item::DataItem;
use serde::{Deserialize, Serialize};

/// Version tag written into every persisted store snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The canonical header/item model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckModel {
    pub header: Vec<HeaderEntry>,
    pub data: Vec<DataItem>,
}

impl CheckModel {
    /// Returns whether a snapshot of this model carries usable state.
    ///
    /// An empty header or item list means the snapshot predates any real
    /// data and reconciliation should start from a fresh normalization.
    pub fn has_content(&self) -> bool {
        !self.header.is_empty() && !self.data.is_empty()
    }
}

/// Full serializable state of the store, persisted on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// Snapshot shape version, see [`SNAPSHOT_VERSION`].
    #[serde(default)]
    pub version: u32,
    /// User scratch list of selected items, independent of `checked` flags.
    #[serde(default)]
    pub selected_items: Vec<DataItem>,
    /// Free-text overall summary.
    pub general_summary: String,
    /// The canonical header/item model.
    pub check_data: CheckModel,
    /// Selection order: titles of checked spaces, most recent last.
    #[serde(default)]
    pub selected_header: Vec<String>,
}

/// Point-in-time copy written once per export action.
///
/// Lives under its own durable key so that clearing the main snapshot does
/// not corrupt an in-flight export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    /// All items that were checked at export time.
    pub selected_items: Vec<DataItem>,
    /// Full model at export time.
    pub check_data: CheckModel,
    /// Summary text at export time.
    pub general_summary: String,
}
