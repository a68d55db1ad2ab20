/// Main entry point for the Fitness Tracker MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use fitness_tracker_mcp::FitnessTrackerServer;

const DATA_DIR: &str = "fitness_tracker";
const DATABASE_FILE: &str = "fitness.db";

/// Pick the first writable location for the database
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(format!(".{}", DATA_DIR))),
        dirs::data_dir().map(|p| p.join(DATA_DIR)),
        dirs::config_dir().map(|p| p.join(DATA_DIR)),
        std::env::current_dir().ok().map(|p| p.join(format!(".{}", DATA_DIR))),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_err() {
            continue;
        }
        let test_file = potential_path.join(".test_write");
        if std::fs::write(&test_file, "test").is_ok() {
            let _ = std::fs::remove_file(&test_file);
            return Ok(potential_path.join(DATABASE_FILE));
        }
    }

    let temp_path = std::env::temp_dir().join(DATA_DIR);
    std::fs::create_dir_all(&temp_path)?;
    let db_path = temp_path.join(DATABASE_FILE);

    tracing::warn!("Using temporary directory for database: {}", db_path.display());
    Ok(db_path)
}

/// Command line arguments for the Fitness Tracker MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SQLite database holding the tracker state
    /// (defaults to ~/.fitness_tracker/fitness.db)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Log lifecycle events
    #[arg(short, long)]
    debug: bool,

    /// Log every request and state change
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        match (self.verbose, self.debug) {
            (true, _) => "debug",
            (false, true) => "info",
            (false, false) => "warn",
        }
    }

    /// The requested database path with its directory created, or the default
    fn database_path(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let Some(path) = &self.database else {
            return get_default_database_path();
        };
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
            _ => {}
        }
        Ok(path.clone())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(format!("fitness_tracker_mcp={}", args.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let db_path = args.database_path()?;
    info!("Starting Fitness Tracker MCP server with database at {}", db_path.display());

    FitnessTrackerServer::new(db_path)?.run().await?;

    info!("Fitness Tracker MCP server shutdown complete");
    Ok(())
}
