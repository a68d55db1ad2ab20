/// Storage layer for persisting tracker state
///
/// The whole application state is saved as one named JSON blob, the same
/// shape the store serializes to. This module defines the storage trait,
/// its errors, and the load path that falls back to defaults.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::TrackerState;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for named state blobs
///
/// This keeps the tracker independent of SQLite; anything that can read
/// and write a string by name can back it.
pub trait StateStorage {
    /// Read the raw payload stored under `name`, if any
    fn load_blob(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload stored under `name`
    fn save_blob(&self, name: &str, payload: &str) -> Result<(), StorageError>;

    /// Remove the payload stored under `name`
    fn delete_blob(&self, name: &str) -> Result<(), StorageError>;

    /// Serialize and save a full state snapshot
    fn save_state(&self, name: &str, state: &TrackerState) -> Result<(), StorageError> {
        let payload = serde_json::to_string(state)?;
        self.save_blob(name, &payload)
    }

    /// Load and deserialize a state snapshot
    ///
    /// `Ok(None)` means nothing has been saved yet; a payload that does not
    /// parse is an error.
    fn load_state(&self, name: &str) -> Result<Option<TrackerState>, StorageError> {
        match self.load_blob(name)? {
            Some(payload) => {
                let mut state: TrackerState = serde_json::from_str(&payload)?;
                state.normalize();
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }
}

/// Load the persisted state, falling back to defaults on any failure
///
/// A missing blob is the normal first-run case. A corrupt blob or a failed
/// read is logged and replaced by an empty store; it is never surfaced to
/// the user.
pub fn load_or_default<S: StateStorage + ?Sized>(storage: &S, name: &str) -> TrackerState {
    match storage.load_state(name) {
        Ok(Some(state)) => {
            tracing::info!(
                "Loaded state '{}': {} measurements, {} wellness entries",
                name,
                state.measurements().len(),
                state.wellness_entries().len()
            );
            state
        }
        Ok(None) => {
            tracing::info!("No saved state '{}', starting fresh", name);
            TrackerState::default()
        }
        Err(e) => {
            tracing::warn!("Failed to load state '{}', using defaults: {}", name, e);
            TrackerState::default()
        }
    }
}
