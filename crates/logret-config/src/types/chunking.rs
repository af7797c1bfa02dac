//! Chunking configuration

use serde::{Deserialize, Serialize};

/// Configuration for splitting a work-log body into chunks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk
    ///
    /// Section content is hard-truncated at this count (not word-boundary
    /// aware). Should stay within the embedding model's effective context.
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

impl crate::validation::Validate for ChunkingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::validation::validate_positive;

        validate_positive("chunking.max_chunk_chars", self.max_chunk_chars, 0)?;
        Ok(())
    }
}

fn default_max_chunk_chars() -> usize {
    2000
}
