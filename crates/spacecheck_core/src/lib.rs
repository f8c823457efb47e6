//! Core domain logic for the spacecheck checklist.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::header::{HeaderEntry, SelectionType};
pub use model::item::{DataItem, ItemKey};
pub use model::snapshot::{CheckModel, ExportSnapshot, StoreSnapshot, SNAPSHOT_VERSION};
pub use model::table::{SourceRecord, SourceTable};
pub use normalize::normalize;
pub use reconcile::{reconcile, Reconciled};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, EXPORT_SNAPSHOT_KEY,
    STORE_SNAPSHOT_KEY,
};
pub use store::custom_space::{CustomSpaceError, CustomSpaceRequest};
pub use store::export::{group_checked_items, SpaceGroup};
pub use store::{CheckStore, SubscriptionId, DEFAULT_GENERAL_SUMMARY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
