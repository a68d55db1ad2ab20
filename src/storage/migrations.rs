/// Schema setup for the state database
///
/// Migrations are plain SQL batches keyed by the version they bring the
/// database to. Opening a database applies whichever ones it has not seen.

use rusqlite::{Connection, OptionalExtension};
use crate::storage::StorageError;

/// (version reached, SQL to run), in ascending version order
const MIGRATIONS: &[(i32, &str)] = &[(
    1,
    "CREATE TABLE IF NOT EXISTS app_state (
        name TEXT PRIMARY KEY,
        payload TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );",
)];

/// Schema version this build writes
pub const CURRENT_VERSION: i32 = 1;

/// Bring the schema up to `CURRENT_VERSION`
///
/// Refuses databases written by a newer build rather than guessing at
/// their layout.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);")?;

    let found = get_current_version(conn)?;
    if found > CURRENT_VERSION {
        return Err(StorageError::Migration(format!(
            "database schema version {} is newer than supported version {}",
            found, CURRENT_VERSION
        )));
    }

    let pending: Vec<&(i32, &str)> = MIGRATIONS.iter().filter(|(v, _)| *v > found).collect();
    if pending.is_empty() {
        return Ok(());
    }

    tracing::info!("Migrating database schema from version {} to {}", found, CURRENT_VERSION);
    let tx = conn.unchecked_transaction()?;
    for (version, sql) in pending {
        tx.execute_batch(sql)
            .map_err(|e| StorageError::Migration(format!("migration to v{} failed: {}", version, e)))?;
    }
    set_version(&tx, CURRENT_VERSION)?;
    tx.commit()?;

    Ok(())
}

/// Schema version recorded in the database; 0 for a fresh file
pub fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0)
        })
        .optional()?
        .flatten();
    Ok(version.unwrap_or(0))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}
