//! Checklist store: owned model, mutation API, change notification.
//!
//! # Responsibility
//! - Own the canonical in-memory header/item model.
//! - Apply mutations synchronously, notify subscribers, then persist.
//! - Load and reconcile persisted state at construction.
//!
//! # Invariants
//! - All getters return copies; callers never hold live references into
//!   the model.
//! - The selection order holds each currently-checked title exactly once,
//!   most recently checked last.
//! - Persistence failures are logged and swallowed; the in-memory model
//!   stays authoritative for the running session.
//! - Subscriber callbacks run synchronously and must not mutate the store
//!   reentrantly.

pub mod custom_space;
pub mod export;

use crate::model::header::HeaderEntry;
use crate::model::item::{DataItem, ItemKey};
use crate::model::snapshot::{CheckModel, StoreSnapshot, SNAPSHOT_VERSION};
use crate::model::table::SourceTable;
use crate::normalize::normalize;
use crate::reconcile::reconcile;
use crate::repo::snapshot_repo::SnapshotRepository;
use log::{info, warn};
use uuid::Uuid;

/// Placeholder summary used until the user writes one.
pub const DEFAULT_GENERAL_SUMMARY: &str = "No general summary yet.";

/// Token identifying one change subscription.
pub type SubscriptionId = Uuid;

/// Reconciling checklist store.
///
/// Constructed explicitly by the composition root and passed to consumers;
/// there is no process-wide instance.
pub struct CheckStore<R: SnapshotRepository> {
    model: CheckModel,
    selected_header: Vec<String>,
    selected_items: Vec<DataItem>,
    general_summary: String,
    observers: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
    repo: R,
}

impl<R: SnapshotRepository> CheckStore<R> {
    /// Builds a store from the persisted snapshot and the current source.
    ///
    /// A valid persisted snapshot is reconciled against a fresh
    /// normalization of `source`; an absent, corrupt or empty snapshot
    /// falls back to the fresh normalization alone. Either way the
    /// resulting state is persisted immediately.
    pub fn new(repo: R, source: &SourceTable) -> Self {
        let persisted = match repo.read_store_snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("event=store_init module=store status=degraded error_code=snapshot_read_failed error={err}");
                None
            }
        };

        // The summary and scratch list are restored from any readable
        // snapshot, even one whose model is empty; only the header/item
        // model itself needs fresh source data to fall back on.
        let (model, selected_header, selected_items, general_summary) = match persisted {
            Some(snapshot) if snapshot.check_data.has_content() => {
                let merged = reconcile(&snapshot, source);
                info!(
                    "event=store_init module=store status=ok mode=reconciled headers={} items={}",
                    merged.model.header.len(),
                    merged.model.data.len()
                );
                (
                    merged.model,
                    merged.selected_header,
                    snapshot.selected_items,
                    summary_or_default(snapshot.general_summary),
                )
            }
            Some(snapshot) => {
                let model = normalize(source);
                info!(
                    "event=store_init module=store status=ok mode=fresh headers={} items={}",
                    model.header.len(),
                    model.data.len()
                );
                (
                    model,
                    Vec::new(),
                    snapshot.selected_items,
                    summary_or_default(snapshot.general_summary),
                )
            }
            None => {
                let model = normalize(source);
                info!(
                    "event=store_init module=store status=ok mode=fresh headers={} items={}",
                    model.header.len(),
                    model.data.len()
                );
                (
                    model,
                    Vec::new(),
                    Vec::new(),
                    DEFAULT_GENERAL_SUMMARY.to_string(),
                )
            }
        };

        let mut store = Self {
            model,
            selected_header,
            selected_items,
            general_summary,
            observers: Vec::new(),
            repo,
        };
        store.persist();
        store
    }

    // ---- getters (copying) ----

    /// Returns a copy of the full header/item model.
    pub fn get_data(&self) -> CheckModel {
        self.model.clone()
    }

    /// Returns copies of all currently checked headers.
    pub fn get_checked_headers(&self) -> Vec<HeaderEntry> {
        self.model
            .header
            .iter()
            .filter(|header| header.checked)
            .cloned()
            .collect()
    }

    /// Returns copies of all items belonging to `space`.
    pub fn get_data_by_space(&self, space: &str) -> Vec<DataItem> {
        self.model
            .data
            .iter()
            .filter(|item| item.space == space)
            .cloned()
            .collect()
    }

    /// Returns the selection order: checked titles, most recent last.
    pub fn get_header_list(&self) -> Vec<String> {
        self.selected_header.clone()
    }

    /// Returns the number of checked items across all spaces.
    pub fn get_selected_count(&self) -> usize {
        self.model.data.iter().filter(|item| item.checked).count()
    }

    /// Returns the current overall summary text.
    pub fn get_general_summary(&self) -> String {
        self.general_summary.clone()
    }

    /// Returns a copy of the user's scratch selection list.
    pub fn get_selected_items(&self) -> Vec<DataItem> {
        self.selected_items.clone()
    }

    // ---- subscriptions ----

    /// Registers a change callback, invoked synchronously after every
    /// mutation. Returns a token for [`CheckStore::unsubscribe`].
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = Uuid::new_v4();
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscription. Returns whether the token was known.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(known, _)| *known != id);
        self.observers.len() != before
    }

    // ---- mutations ----

    /// Flips the checked state of the header at `index`.
    ///
    /// Updates the selection order: append on check, remove on uncheck.
    /// Out-of-range indices are a silent no-op.
    pub fn toggle_header(&mut self, index: usize) {
        let Some(header) = self.model.header.get_mut(index) else {
            return;
        };
        header.checked = !header.checked;
        let title = header.title.clone();
        let checked = header.checked;
        self.update_selection_order(&title, checked);
        self.notify_and_persist();
    }

    /// Flips the checked state of the item addressed by `key`.
    /// A miss is a silent no-op.
    pub fn toggle_item(&mut self, key: &ItemKey) {
        let Some(item) = self.model.data.iter_mut().find(|item| item.matches(key)) else {
            return;
        };
        item.checked = !item.checked;
        self.notify_and_persist();
    }

    /// Overwrites the note of the item addressed by `key`.
    /// A miss is a silent no-op.
    pub fn update_description(&mut self, key: &ItemKey, description: &str) {
        let Some(item) = self.model.data.iter_mut().find(|item| item.matches(key)) else {
            return;
        };
        item.note = description.to_string();
        self.notify_and_persist();
    }

    /// Renames the item addressed by `key`.
    ///
    /// A blank `name` or a miss is a silent no-op. The rename changes the
    /// item's identity key, so it only survives until the next
    /// reconciliation unless the source adopts the new name too.
    pub fn update_item_name(&mut self, key: &ItemKey, name: &str) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        let Some(item) = self.model.data.iter_mut().find(|item| item.matches(key)) else {
            return;
        };
        item.project = trimmed.to_string();
        self.notify_and_persist();
    }

    /// Appends a new unchecked item to `space` and returns its key.
    ///
    /// A blank `project_name` is a silent no-op returning `None`. The
    /// returned key lets the caller immediately follow up (for example
    /// with [`CheckStore::toggle_item`]) without waiting for a render
    /// pass.
    pub fn add_item(&mut self, space: &str, project_name: &str) -> Option<ItemKey> {
        let trimmed = project_name.trim();
        if trimmed.is_empty() {
            return None;
        }
        let item = DataItem::new(space, trimmed);
        let key = item.key();
        self.model.data.push(item);
        self.notify_and_persist();
        Some(key)
    }

    /// Stores the overall summary, or resets it to the default placeholder
    /// when `summary` is empty.
    pub fn set_general_summary(&mut self, summary: &str) {
        self.general_summary = if summary.is_empty() {
            DEFAULT_GENERAL_SUMMARY.to_string()
        } else {
            summary.to_string()
        };
        self.notify_and_persist();
    }

    /// Resets the overall summary to the default placeholder.
    pub fn clear_general_summary(&mut self) {
        self.general_summary = DEFAULT_GENERAL_SUMMARY.to_string();
        self.notify_and_persist();
    }

    /// Replaces the user's scratch selection list.
    pub fn set_selected_items(&mut self, items: Vec<DataItem>) {
        self.selected_items = items;
        self.notify_and_persist();
    }

    /// Empties the user's scratch selection list.
    pub fn clear_selected_items(&mut self) {
        self.selected_items.clear();
        self.notify_and_persist();
    }

    /// Resets the store to its empty state and erases both persisted
    /// snapshots.
    pub fn clear_all(&mut self) {
        self.general_summary = DEFAULT_GENERAL_SUMMARY.to_string();
        self.selected_items.clear();
        self.selected_header.clear();
        self.model = CheckModel::default();

        if let Err(err) = self.repo.clear_store_snapshot() {
            warn!("event=store_clear module=store status=degraded key=store error={err}");
        }
        if let Err(err) = self.repo.clear_export_snapshot() {
            warn!("event=store_clear module=store status=degraded key=export error={err}");
        }
        info!("event=store_clear module=store status=ok");
        self.notify();
    }

    // ---- internals ----

    fn update_selection_order(&mut self, title: &str, checked: bool) {
        self.selected_header.retain(|known| known != title);
        if checked {
            self.selected_header.push(title.to_string());
        }
    }

    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            version: SNAPSHOT_VERSION,
            selected_items: self.selected_items.clone(),
            general_summary: self.general_summary.clone(),
            check_data: self.model.clone(),
            selected_header: self.selected_header.clone(),
        }
    }

    fn persist(&self) {
        if let Err(err) = self.repo.write_store_snapshot(&self.snapshot()) {
            warn!("event=snapshot_write module=store status=degraded error={err}");
        }
    }

    fn notify(&mut self) {
        for (_, callback) in &mut self.observers {
            callback();
        }
    }

    fn notify_and_persist(&mut self) {
        self.notify();
        self.persist();
    }
}

fn summary_or_default(summary: String) -> String {
    if summary.is_empty() {
        DEFAULT_GENERAL_SUMMARY.to_string()
    } else {
        summary
    }
}
