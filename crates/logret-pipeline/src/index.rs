//! Upsert pipeline: validate, chunk, batch-embed, store.
//!
//! The gateway is called once per upsert, before the storage transaction
//! opens. A gateway fault therefore leaves any previous entry for the path
//! untouched, and the transactional replace makes a partial upsert
//! unobservable.

use anyhow::Result;
use logret_config::ChunkingConfig;
use logret_core::chunking::SectionChunker;
use logret_core::{Embedder, RetrievalError};
use logret_store::{DocumentRecord, LogStore};
use tracing::debug;

/// One work-log entry as extracted by the caller: summary and tags from the
/// command line, date/category from frontmatter (both optional).
#[derive(Debug, Clone)]
pub struct UpsertInput {
    pub path: String,
    pub summary: String,
    pub tags: String,
    pub body: String,
    pub date: Option<String>,
    pub category: Option<String>,
}

/// Insert-or-replace the entry keyed by `input.path`.
/// Returns the number of chunks written.
pub async fn upsert_entry(
    store: &mut LogStore,
    embedder: &dyn Embedder,
    chunking: &ChunkingConfig,
    input: &UpsertInput,
) -> Result<usize> {
    if input.path.trim().is_empty() {
        return Err(RetrievalError::validation("upsert", "path must not be empty").into());
    }
    if input.summary.trim().is_empty() {
        return Err(RetrievalError::validation(
            "upsert",
            format!("summary must not be empty for '{}'", input.path),
        )
        .into());
    }

    let chunker = SectionChunker::with_config(chunking.clone());
    let mut chunks = chunker.split(&input.body, &input.summary);

    // One batched gateway call for all chunk texts.
    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let embeddings = embedder.embed_batch(&texts).await.map_err(|e| {
        RetrievalError::gateway("upsert", format!("'{}': {}", input.path, e))
    })?;

    if embeddings.len() != chunks.len() {
        return Err(RetrievalError::gateway(
            "upsert",
            format!(
                "'{}': got {} embeddings for {} chunks",
                input.path,
                embeddings.len(),
                chunks.len()
            ),
        )
        .into());
    }
    for embedding in &embeddings {
        if embedding.len() != store.dim() {
            return Err(RetrievalError::gateway(
                "upsert",
                format!(
                    "'{}': embedding dimension {} does not match store dimension {}",
                    input.path,
                    embedding.len(),
                    store.dim()
                ),
            )
            .into());
        }
    }

    for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
        chunk.embedding = Some(embedding);
    }

    let record = DocumentRecord {
        path: input.path.clone(),
        summary: input.summary.clone(),
        tags: input.tags.clone(),
        date: input.date.clone(),
        category: input.category.clone(),
    };
    let written = store.replace_document(&record, &chunks)?;
    debug!(path = %input.path, chunks = written, "entry indexed");
    Ok(written)
}
