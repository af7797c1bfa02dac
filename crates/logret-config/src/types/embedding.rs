//! Embedding gateway configuration

use serde::{Deserialize, Serialize};

/// Which embedding backend to use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// OpenAI-compatible HTTP API (requires OPENAI_API_KEY)
    External,
    /// Local Ollama server (OLLAMA_BASE_URL, default http://localhost:11434)
    Ollama,
    /// Deterministic hash-based pseudo-embeddings, no network
    ///
    /// Useful for offline smoke runs and tests. Not semantically meaningful.
    Hash,
}

impl Default for EmbeddingBackend {
    fn default() -> Self {
        EmbeddingBackend::External
    }
}

/// Configuration for the embedding gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Backend selection
    ///
    /// `external` falls back to `ollama` when OPENAI_API_KEY is not set.
    #[serde(default)]
    pub backend: EmbeddingBackend,

    /// Model name passed to the backend
    ///
    /// Empty means backend default ("text-embedding-3-small" for external,
    /// "nomic-embed-text" for Ollama).
    #[serde(default)]
    pub model_name: String,

    /// Vector dimension of the store
    ///
    /// Fixed at schema-creation time. Every vector written or searched must
    /// have exactly this many f32 components.
    #[serde(default = "default_dim")]
    pub dim: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::default(),
            model_name: String::new(),
            dim: default_dim(),
        }
    }
}

impl crate::validation::Validate for EmbeddingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::validation::validate_positive;

        validate_positive("embedding.dim", self.dim, 0)?;
        Ok(())
    }
}

fn default_dim() -> usize {
    384
}
