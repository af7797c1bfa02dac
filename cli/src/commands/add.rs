use crate::frontmatter::parse_frontmatter;
use anyhow::Result;
use logret_config::Config;
use logret_core::RetrievalError;
use logret_pipeline::{upsert_entry, UpsertInput};
use std::path::Path;

pub async fn handle_add(config: &Config, file: &Path, summary: &str, tags: &str) -> Result<()> {
    let content = std::fs::read_to_string(file).map_err(|e| {
        RetrievalError::validation("add", format!("cannot read '{}': {}", file.display(), e))
    })?;
    let parsed = parse_frontmatter(&content);

    let mut store = super::open_store(config)?;
    let embedder = logret_context::shared_embedder(&config.embedding).await?;

    let input = UpsertInput {
        path: file.display().to_string(),
        summary: summary.to_string(),
        tags: tags.to_string(),
        body: parsed.body,
        date: parsed.date,
        category: parsed.category,
    };
    let chunks = upsert_entry(&mut store, embedder.as_ref(), &config.chunking, &input).await?;

    println!("Indexed: {} ({} chunks)", input.path, chunks);
    Ok(())
}
