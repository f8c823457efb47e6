//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `spacecheck_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use spacecheck_core::db::open_db_in_memory;
use spacecheck_core::{CheckStore, SourceTable, SqliteSnapshotRepository};

const SAMPLE_TABLE: &str = r#"{
    "header": ["category", "project", "note", "Kitchen", "Bathroom", "done"],
    "data": [
        { "category": "appliance", "project": "stove", "note": "", "Kitchen": 1 },
        { "category": "plumbing", "project": "faucet", "note": "", "Kitchen": 1, "Bathroom": 1 }
    ]
}"#;

fn main() {
    println!("spacecheck_core version={}", spacecheck_core::core_version());

    let log_dir = std::env::temp_dir().join("spacecheck-cli-logs");
    if let Some(log_dir) = log_dir.to_str() {
        if let Err(err) = spacecheck_core::init_logging(spacecheck_core::default_log_level(), log_dir)
        {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory database: {err}");
            std::process::exit(1);
        }
    };
    let repo = match SqliteSnapshotRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("failed to build snapshot repository: {err}");
            std::process::exit(1);
        }
    };

    let table = SourceTable::from_json(SAMPLE_TABLE).unwrap_or_default();
    let store = CheckStore::new(repo, &table);
    let model = store.get_data();
    println!(
        "spacecheck_core smoke headers={} items={}",
        model.header.len(),
        model.data.len()
    );
}
