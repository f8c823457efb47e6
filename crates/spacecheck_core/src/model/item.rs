//! Checklist item model.
//!
//! # Responsibility
//! - Represent one checklist entry inside a space.
//! - Provide the `(space, project)` identity key used to match items
//!   across normalization passes.
//!
//! # Invariants
//! - `(space, project)` is unique within a space at all times.
//! - Custom-space items are independent copies; mutating one never touches
//!   the base item it was copied from.

use serde::{Deserialize, Serialize};

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItem {
    /// Title of the space this item belongs to.
    pub space: String,
    /// Informational grouping label from the source table, may be empty.
    pub category: String,
    /// Item name, the second half of the identity key.
    pub project: String,
    /// Free-text user note.
    pub note: String,
    /// Whether the user has checked this item.
    pub checked: bool,
}

impl DataItem {
    /// Creates an unchecked item with empty category and note.
    pub fn new(space: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            category: String::new(),
            project: project.into(),
            note: String::new(),
            checked: false,
        }
    }

    /// Returns this item's identity key.
    pub fn key(&self) -> ItemKey {
        ItemKey {
            space: self.space.clone(),
            project: self.project.clone(),
        }
    }

    /// Returns whether this item is addressed by `key`.
    pub fn matches(&self, key: &ItemKey) -> bool {
        self.space == key.space && self.project == key.project
    }
}

/// Identity key addressing one item: `(space, project)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemKey {
    pub space: String,
    pub project: String,
}

impl ItemKey {
    pub fn new(space: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            project: project.into(),
        }
    }
}
