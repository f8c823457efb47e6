//! Reconciliation of a persisted snapshot with fresh source data.
//!
//! # Responsibility
//! - Merge user-visible state (checked flags, notes, custom spaces) into a
//!   freshly normalized source table.
//! - Rebuild the selection order against the merged header set.
//!
//! # Invariants
//! - Base-space membership is authoritative from the source: items absent
//!   from the fresh normalization do not survive, even if the user added or
//!   renamed them in a previous session.
//! - Custom headers and their items pass through unmodified; they are never
//!   recomputed from source.

use crate::model::header::HeaderEntry;
use crate::model::item::DataItem;
use crate::model::snapshot::{CheckModel, StoreSnapshot};
use crate::model::table::SourceTable;
use crate::normalize::normalize;
use std::collections::{HashMap, HashSet};

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// Merged header/item model.
    pub model: CheckModel,
    /// Selection order rebuilt against the merged headers.
    pub selected_header: Vec<String>,
}

/// Merges `persisted` with a fresh normalization of `source`.
///
/// Last-writer-wins by identity key: persisted `checked`/`note` state is
/// copied onto fresh base items matched by `(space, project)`, persisted
/// `checked` onto fresh base headers matched by title. There is no change
/// log; unmatched persisted base items are dropped.
pub fn reconcile(persisted: &StoreSnapshot, source: &SourceTable) -> Reconciled {
    let (custom_headers, original_headers): (Vec<HeaderEntry>, Vec<HeaderEntry>) = persisted
        .check_data
        .header
        .iter()
        .cloned()
        .partition(|header| header.is_custom);

    let fresh = normalize(source);

    let original_checked: HashMap<&str, bool> = original_headers
        .iter()
        .map(|header| (header.title.as_str(), header.checked))
        .collect();

    let mut header: Vec<HeaderEntry> = fresh
        .header
        .into_iter()
        .map(|mut entry| {
            if let Some(&checked) = original_checked.get(entry.title.as_str()) {
                entry.checked = checked;
            }
            entry
        })
        .collect();

    // Persisted item state survives only for keys the source still emits.
    let item_state: HashMap<(&str, &str), (bool, &str)> = persisted
        .check_data
        .data
        .iter()
        .map(|item| {
            (
                (item.space.as_str(), item.project.as_str()),
                (item.checked, item.note.as_str()),
            )
        })
        .collect();

    let mut data: Vec<DataItem> = fresh
        .data
        .into_iter()
        .map(|mut item| {
            if let Some(&(checked, note)) =
                item_state.get(&(item.space.as_str(), item.project.as_str()))
            {
                item.checked = checked;
                item.note = note.to_string();
            }
            item
        })
        .collect();

    let custom_titles: HashSet<&str> = custom_headers
        .iter()
        .map(|header| header.title.as_str())
        .collect();

    data.extend(
        persisted
            .check_data
            .data
            .iter()
            .filter(|item| custom_titles.contains(item.space.as_str()))
            .cloned(),
    );

    let fresh_titles: HashSet<&str> = header
        .iter()
        .map(|entry| entry.title.as_str())
        .collect();

    // Keep a persisted selection-order title only when it still resolves:
    // a surviving custom title, or a base title known both before and now.
    let selected_header: Vec<String> = persisted
        .selected_header
        .iter()
        .filter(|title| {
            custom_titles.contains(title.as_str())
                || (fresh_titles.contains(title.as_str())
                    && original_checked.contains_key(title.as_str()))
        })
        .cloned()
        .collect();

    header.extend(custom_headers);

    Reconciled {
        model: CheckModel { header, data },
        selected_header,
    }
}
