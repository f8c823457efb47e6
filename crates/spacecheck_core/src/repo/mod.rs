//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable snapshot access contract used by the store.
//! - Isolate SQLite and JSON codec details from business orchestration.
//!
//! # Invariants
//! - Snapshots are read and written whole under one durable key each.
//! - Reading a corrupt or version-mismatched blob degrades to "no
//!   snapshot" instead of surfacing a decode error to the store.

pub mod snapshot_repo;
