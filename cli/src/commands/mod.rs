pub mod add;
pub mod delete;
pub mod init;
pub mod search;
pub mod status;

pub use add::handle_add;
pub use delete::handle_delete;
pub use init::handle_init;
pub use search::handle_search;
pub use status::handle_status;

use clap::{Parser, Subcommand};
use logret_config::Config;
use logret_store::LogStore;
use std::path::PathBuf;

/// Open the configured store and make sure the schema exists.
pub(crate) fn open_store(config: &Config) -> anyhow::Result<LogStore> {
    let store = LogStore::open(&config.store.db_path, config.embedding.dim)?;
    store.ensure_ready()?;
    Ok(store)
}

#[derive(Parser)]
#[command(name = "logret")]
#[command(about = "semantic retrieval store for work-log notes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database schema (also happens automatically on first use)
    Init,
    /// Index a work-log file (insert or replace by path)
    Add {
        /// Path to the work-log markdown file
        #[arg(short, long)]
        file: PathBuf,

        /// One-line summary of the entry
        #[arg(short, long)]
        summary: String,

        /// Comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
    },
    /// Remove a work-log entry and its chunks/vectors
    Delete {
        /// Path the entry was indexed under
        #[arg(short, long)]
        file: String,
    },
    /// Search work logs by semantic similarity
    Search {
        /// The query string
        query: String,

        /// Max results (defaults to search.default_limit, normally 5)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Filter by tag (case-insensitive substring of the tag list)
        #[arg(short, long, default_value = "")]
        tag: String,

        /// Filter by entry type (case-insensitive exact match)
        #[arg(short = 'T', long = "type", default_value = "")]
        r#type: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Show store location and entry counts
    Status,
}
