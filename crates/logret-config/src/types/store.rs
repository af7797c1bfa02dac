//! Storage configuration (database location)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the on-disk document/vector store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    ///
    /// The parent directory is created on first use. Relative paths are
    /// resolved against the working directory.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl crate::validation::Validate for StoreConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "store.db_path".to_string(),
                message: "Database path cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("docs/work-logs/.vector-db/work-logs.db")
}
