//! Selection export.
//!
//! # Responsibility
//! - Snapshot the currently checked items into the second durable key for
//!   the export-consuming view.
//! - Group checked items by space in selection order for presentation.
//!
//! # Invariants
//! - The export snapshot is written once per export action and never
//!   mutated by the store afterward.
//! - Grouping is stable: spaces absent from the selection order come last,
//!   in the order their items were encountered.

use crate::model::item::DataItem;
use crate::model::snapshot::{CheckModel, ExportSnapshot};
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::store::CheckStore;
use log::{info, warn};

/// Checked items of one space, in model order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceGroup {
    pub space: String,
    pub items: Vec<DataItem>,
}

impl<R: SnapshotRepository> CheckStore<R> {
    /// Writes the current selection to the export key and returns it.
    ///
    /// The snapshot carries every checked item, the full model and the
    /// summary. A failed write is logged and swallowed; the returned
    /// snapshot is still valid for the running session.
    pub fn export_selection(&self) -> ExportSnapshot {
        let snapshot = ExportSnapshot {
            selected_items: self
                .model
                .data
                .iter()
                .filter(|item| item.checked)
                .cloned()
                .collect(),
            check_data: self.model.clone(),
            general_summary: self.general_summary.clone(),
        };

        match self.repo.write_export_snapshot(&snapshot) {
            Ok(()) => info!(
                "event=export_write module=store status=ok items={}",
                snapshot.selected_items.len()
            ),
            Err(err) => {
                warn!("event=export_write module=store status=degraded error={err}");
            }
        }

        snapshot
    }
}

/// Partitions checked items by space for presentation.
///
/// Groups whose title appears in `selection_order` come first, in that
/// order; the rest follow in the order their first item appears in the
/// model. Ordering is stable throughout.
pub fn group_checked_items(model: &CheckModel, selection_order: &[String]) -> Vec<SpaceGroup> {
    let mut groups: Vec<SpaceGroup> = Vec::new();
    for item in model.data.iter().filter(|item| item.checked) {
        match groups.iter_mut().find(|group| group.space == item.space) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(SpaceGroup {
                space: item.space.clone(),
                items: vec![item.clone()],
            }),
        }
    }

    let rank = |space: &str| -> (bool, usize) {
        match selection_order.iter().position(|title| title == space) {
            Some(position) => (false, position),
            None => (true, 0),
        }
    };
    groups.sort_by_key(|group| rank(&group.space));
    groups
}
