//! Embedding gateway: backend selection and the process-wide memoized handle.

pub mod embedder;
pub mod hash;

pub use embedder::select_embedder;
pub use hash::HashEmbedder;

use anyhow::Result;
use logret_config::EmbeddingConfig;
use logret_core::{Embedder, RetrievalError};
use std::sync::Arc;
use tokio::sync::OnceCell;

type SharedEmbedder = Arc<dyn Embedder + Send + Sync>;

static GATEWAY: OnceCell<std::result::Result<SharedEmbedder, String>> = OnceCell::const_new();

/// Return the process-wide embedder, selecting a backend on first call.
///
/// Selection runs at most once per process; later calls return the cached
/// handle, or the cached failure without retrying.
pub async fn shared_embedder(config: &EmbeddingConfig) -> Result<SharedEmbedder> {
    let slot = GATEWAY
        .get_or_init(|| async {
            select_embedder(config).await.map_err(|e| e.to_string())
        })
        .await;

    match slot {
        Ok(embedder) => Ok(embedder.clone()),
        Err(message) => Err(RetrievalError::gateway("embedder init", message.clone()).into()),
    }
}
