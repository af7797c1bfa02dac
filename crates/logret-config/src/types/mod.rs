//! Type-safe configuration structs

pub mod chunking;
pub mod embedding;
pub mod search;
pub mod store;

pub use chunking::ChunkingConfig;
pub use embedding::{EmbeddingBackend, EmbeddingConfig};
pub use search::SearchConfig;
pub use store::StoreConfig;

use crate::validation::Validate;
use serde::{Deserialize, Serialize};

/// Main configuration struct aggregating all settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub chunking: ChunkingConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

impl Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.store.validate()?;
        self.embedding.validate()?;
        self.chunking.validate()?;
        self.search.validate()?;
        Ok(())
    }
}
