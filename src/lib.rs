/// Public library interface for the Fitness Tracker MCP server
///
/// This module exports the main server implementation and the public types
/// that can be used by other applications or tests.

use std::path::PathBuf;
use thiserror::Error;

pub mod analytics;
pub mod domain;
pub mod mcp;
pub mod storage;
pub mod tools;
pub mod tracker;

// Re-export public modules and types
pub use analytics::AnalyticsEngine;
pub use domain::*;
pub use storage::{load_or_default, SqliteStorage, StateStorage, StorageError};
pub use tools::ToolError;
pub use tracker::{PersistObserver, StateObserver, Tracker};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main fitness tracker server that implements the MCP protocol
///
/// Loads the saved state once at startup and keeps it in a Tracker whose
/// persistence observer writes every change back to SQLite.
pub struct FitnessTrackerServer {
    tracker: Tracker,
}

impl FitnessTrackerServer {
    /// Create a new server backed by the database at `db_path`
    ///
    /// The schema is created if needed. A missing or unreadable saved state
    /// starts the tracker empty.
    pub fn new(db_path: PathBuf) -> Result<Self, TrackerError> {
        tracing::info!("Initializing Fitness Tracker server with database: {:?}", db_path);
        Ok(Self::with_storage(SqliteStorage::new(db_path)?))
    }

    /// Create a server whose state lives only as long as the process
    pub fn in_memory() -> Result<Self, TrackerError> {
        Ok(Self::with_storage(SqliteStorage::in_memory()?))
    }

    /// Load the state from `storage`, then persist every change back to it
    pub fn with_storage<S: StateStorage + Send + 'static>(storage: S) -> Self {
        let state = load_or_default(&storage, STATE_BLOB_NAME);
        let mut tracker = Tracker::new(state);
        tracker.subscribe(Box::new(PersistObserver::new(storage, STATE_BLOB_NAME)));
        Self { tracker }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// Returns once stdin is closed.
    pub async fn run(self) -> Result<(), TrackerError> {
        tracing::info!("Starting MCP server...");

        let state = self.tracker.state();
        tracing::info!(
            "Server started with {} measurements and {} wellness entries",
            state.measurements().len(),
            state.wellness_entries().len()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut Tracker {
        &mut self.tracker
    }
}
