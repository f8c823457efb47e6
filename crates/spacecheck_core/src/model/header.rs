//! Space header model.
//!
//! # Responsibility
//! - Represent one selectable group of checklist items ("space").
//! - Distinguish base spaces (source table columns) from user-defined
//!   custom spaces.
//!
//! # Invariants
//! - `title` is the identity key; it is unique across all headers.
//! - `original_spaces` is empty for base headers and non-empty for custom
//!   headers, and may name only non-custom headers (no nesting).

use serde::{Deserialize, Serialize};

/// How items inside a space may be selected.
///
/// Only multi-select exists today; the enum keeps the persisted shape
/// forward-compatible with single-select spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    /// Any number of items may be checked at once.
    Multiple,
}

impl Default for SelectionType {
    fn default() -> Self {
        Self::Multiple
    }
}

/// A selectable group of checklist items.
///
/// Base headers are (re)created from the source table on every
/// reconciliation pass; custom headers are created once by the user and
/// pass through reconciliation unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderEntry {
    /// Unique space name, the identity key of this header.
    pub title: String,
    /// Whether the user currently has this space selected.
    pub checked: bool,
    /// `true` for user-defined aggregations, `false` for source columns.
    pub is_custom: bool,
    /// Item selection behavior inside this space.
    #[serde(default)]
    pub selection_type: SelectionType,
    /// Base-space titles a custom header aggregates. Empty for base headers.
    #[serde(default)]
    pub original_spaces: Vec<String>,
}

impl HeaderEntry {
    /// Creates an unchecked base-space header for a source table column.
    pub fn base(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            checked: false,
            is_custom: false,
            selection_type: SelectionType::Multiple,
            original_spaces: Vec::new(),
        }
    }

    /// Creates a checked custom-space header aggregating the given base
    /// spaces.
    ///
    /// The caller is responsible for validating `original_spaces` against
    /// the current header set before inserting the result into a model.
    pub fn custom(
        title: impl Into<String>,
        selection_type: SelectionType,
        original_spaces: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            checked: true,
            is_custom: true,
            selection_type,
            original_spaces,
        }
    }
}
