//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide whole-blob read/write/clear for the two durable snapshot keys.
//! - Keep SQL and JSON codec details inside the persistence boundary.
//!
//! # Invariants
//! - The main snapshot and the export snapshot live under distinct keys;
//!   clearing one never touches the other.
//! - Unreadable persisted state is reported as absent, not as an error.

use crate::db::DbError;
use crate::model::snapshot::{ExportSnapshot, StoreSnapshot, SNAPSHOT_VERSION};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Durable key of the main store snapshot, written on every mutation.
pub const STORE_SNAPSHOT_KEY: &str = "check_store";
/// Durable key of the export snapshot, written once per export action.
pub const EXPORT_SNAPSHOT_KEY: &str = "check_selection";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable access contract for the store and export snapshots.
pub trait SnapshotRepository {
    /// Reads the main snapshot. Returns `None` when absent, corrupt or
    /// written by an unsupported snapshot version.
    fn read_store_snapshot(&self) -> RepoResult<Option<StoreSnapshot>>;
    /// Writes the main snapshot whole, replacing any previous value.
    fn write_store_snapshot(&self, snapshot: &StoreSnapshot) -> RepoResult<()>;
    /// Deletes the main snapshot.
    fn clear_store_snapshot(&self) -> RepoResult<()>;
    /// Reads the export snapshot. Returns `None` when absent or corrupt.
    fn read_export_snapshot(&self) -> RepoResult<Option<ExportSnapshot>>;
    /// Writes the export snapshot whole, replacing any previous value.
    fn write_export_snapshot(&self, snapshot: &ExportSnapshot) -> RepoResult<()>;
    /// Deletes the export snapshot.
    fn clear_export_snapshot(&self) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository over the `snapshots` table.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        // A missing table means the caller skipped db::open_db bootstrap.
        conn.prepare("SELECT key FROM snapshots LIMIT 1;")?;
        Ok(Self { conn })
    }

    fn read_value(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_value(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO snapshots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear_value(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM snapshots WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn decode_value<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        let Some(raw) = self.read_value(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(err) => {
                warn!(
                    "event=snapshot_read module=repo status=degraded key={key} error_code=decode_failed error={err}"
                );
                Ok(None)
            }
        }
    }

    fn encode_value<T: Serialize>(&self, key: &str, value: &T) -> RepoResult<()> {
        let raw = serde_json::to_string(value).map_err(RepoError::Encode)?;
        self.write_value(key, &raw)
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn read_store_snapshot(&self) -> RepoResult<Option<StoreSnapshot>> {
        let Some(snapshot) = self.decode_value::<StoreSnapshot>(STORE_SNAPSHOT_KEY)? else {
            return Ok(None);
        };
        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                "event=snapshot_read module=repo status=degraded key={STORE_SNAPSHOT_KEY} error_code=version_mismatch found={} supported={SNAPSHOT_VERSION}",
                snapshot.version
            );
            return Ok(None);
        }
        Ok(Some(snapshot))
    }

    fn write_store_snapshot(&self, snapshot: &StoreSnapshot) -> RepoResult<()> {
        self.encode_value(STORE_SNAPSHOT_KEY, snapshot)
    }

    fn clear_store_snapshot(&self) -> RepoResult<()> {
        self.clear_value(STORE_SNAPSHOT_KEY)
    }

    fn read_export_snapshot(&self) -> RepoResult<Option<ExportSnapshot>> {
        self.decode_value(EXPORT_SNAPSHOT_KEY)
    }

    fn write_export_snapshot(&self, snapshot: &ExportSnapshot) -> RepoResult<()> {
        self.encode_value(EXPORT_SNAPSHOT_KEY, snapshot)
    }

    fn clear_export_snapshot(&self) -> RepoResult<()> {
        self.clear_value(EXPORT_SNAPSHOT_KEY)
    }
}
