//! Canonical domain model for the checklist store.
//!
//! # Responsibility
//! - Define the header/item shapes shared by normalization, reconciliation
//!   and the store mutation API.
//! - Define the persisted snapshot blobs and the raw source-table shape.
//!
//! # Invariants
//! - Headers are identified by `title`; items by the `(space, project)` pair.
//! - Custom headers reference only non-custom headers via `original_spaces`.

pub mod header;
pub mod item;
pub mod snapshot;
pub mod table;
