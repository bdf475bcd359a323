use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Collection key for the full workspace graph
pub const KEY_WORKSPACES: &str = "workspaces";
/// Collection key for the journal entries
pub const KEY_JOURNAL: &str = "journal";
/// Collection key for the store-level selection pointers
pub const KEY_SELECTION: &str = "selection";

/// Version written into every persisted envelope
const ENVELOPE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
    #[error("Failed to create database directory: {0}")]
    DirectoryError(String),
    #[error("Failed to encode collection '{key}': {reason}")]
    SerializationError { key: String, reason: String },
    #[error("Corrupt data under key '{key}': {reason}")]
    CorruptData { key: String, reason: String },
}

/// Self-describing wrapper around every persisted blob, so new optional
/// fields never break old data.
#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    version: u32,
    items: T,
}

/// Durable key-value store for the entity graph: one row per top-level
/// collection, JSON envelope blobs as values.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path and initialize the schema
    pub fn new(path: &str) -> Result<Self, DatabaseError> {
        let db_path = PathBuf::from(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DatabaseError::DirectoryError(e.to_string()))?;
            }
        }

        let conn = Connection::open(&db_path)?;

        let db = Database { conn };
        db.initialize_schema()?;

        Ok(db)
    }

    /// Open an in-memory database, for tests that never reopen the file
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS collections (
                key             TEXT PRIMARY KEY,
                value           BLOB NOT NULL,
                revision        INTEGER NOT NULL DEFAULT 1,
                updated_at      TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Serialize a collection into its versioned envelope and write it
    /// atomically under the key. A failed encode skips the write entirely;
    /// a failed write rolls back, leaving the prior persisted value intact.
    pub fn save<T: Serialize>(&self, key: &str, items: &T) -> Result<(), DatabaseError> {
        let envelope = Envelope {
            version: ENVELOPE_VERSION,
            items,
        };
        let blob = serde_json::to_vec(&envelope).map_err(|e| DatabaseError::SerializationError {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        self.write_blob(key, &blob)
    }

    /// Read and decode the collection stored under the key.
    /// A missing key is not an error and yields the default (empty) value;
    /// an undecodable blob yields `CorruptData` so the caller can recover.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM collections WHERE key = ?1")?;

        let blob: Option<Vec<u8>> = match stmt.query_row(rusqlite::params![key], |row| row.get(0)) {
            Ok(value) => Some(value),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(DatabaseError::from(e)),
        };

        let Some(blob) = blob else {
            return Ok(T::default());
        };

        let envelope: Envelope<T> =
            serde_json::from_slice(&blob).map_err(|e| DatabaseError::CorruptData {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        Ok(envelope.items)
    }

    /// Number of committed writes under the key, if any.
    /// Lets callers observe write coalescing without decoding blobs.
    pub fn revision(&self, key: &str) -> Result<Option<i64>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT revision FROM collections WHERE key = ?1")?;

        match stmt.query_row(rusqlite::params![key], |row| row.get(0)) {
            Ok(revision) => Ok(Some(revision)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::from(e)),
        }
    }

    /// Overwrite the raw bytes under a key, bypassing the envelope.
    /// Exists for corruption-recovery tests.
    #[doc(hidden)]
    pub fn write_raw(&self, key: &str, blob: &[u8]) -> Result<(), DatabaseError> {
        self.write_blob(key, blob)
    }

    fn write_blob(&self, key: &str, blob: &[u8]) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO collections (key, value, revision, updated_at)
             VALUES (?1, ?2, 1, ?3)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 revision = collections.revision + 1,
                 updated_at = excluded.updated_at",
            rusqlite::params![
                key,
                blob,
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
            ],
        )?;
        tx.commit()?;
        Ok(())
    }
}
