use anyhow::Result;
use async_trait::async_trait;

/// Boundary to the external embedding function.
///
/// Implementations must be deterministic within a process and return vectors
/// of a fixed dimension. `embed_batch` is order-preserving: one vector per
/// input text, in input order.
#[async_trait]
pub trait Embedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
