/// SQLite implementation of the state storage interface
///
/// This module stores named state blobs in a single `app_state` table.
/// Each save replaces the whole payload for that name.

use std::path::PathBuf;
use rusqlite::{Connection, OptionalExtension, params};
use chrono::Utc;

use crate::storage::{StorageError, StateStorage, migrations};

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// the blob operations defined in the StateStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Create a storage instance backed by a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// When the blob under `name` was last written (RFC 3339)
    pub fn last_saved_at(&self, name: &str) -> Result<Option<String>, StorageError> {
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM app_state WHERE name = ?1",
                params![name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(updated_at)
    }
}

impl StateStorage for SqliteStorage {
    fn load_blob(&self, name: &str) -> Result<Option<String>, StorageError> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM app_state WHERE name = ?1",
                params![name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save_blob(&self, name: &str, payload: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO app_state (name, payload, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
            params![name, payload, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!("Saved state '{}' ({} bytes)", name, payload.len());
        Ok(())
    }

    fn delete_blob(&self, name: &str) -> Result<(), StorageError> {
        let rows = self
            .conn
            .execute("DELETE FROM app_state WHERE name = ?1", params![name])?;
        tracing::debug!("Deleted state '{}' ({} rows)", name, rows);
        Ok(())
    }
}
