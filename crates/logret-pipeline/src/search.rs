//! Search pipeline: embed the query, oversampled k-NN scan, tag/type
//! filters, per-document dedup, result shaping.

use anyhow::Result;
use logret_config::SearchConfig;
use logret_core::models::SearchMatch;
use logret_core::{Embedder, RetrievalError};
use logret_store::LogStore;
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub limit: usize,
    /// Kept only if this is a case-insensitive substring of the document's
    /// tags. Empty means no filtering.
    pub tag_filter: String,
    /// Kept only if this case-insensitively equals the document's category.
    /// Empty means no filtering.
    pub type_filter: String,
}

/// Run a semantic search. Results are ordered by descending relevance, at
/// most `limit` long; each document appears at most once, represented by its
/// best-scoring chunk. An empty result set is a valid outcome.
pub async fn search(
    store: &LogStore,
    embedder: &dyn Embedder,
    config: &SearchConfig,
    request: &SearchRequest,
) -> Result<Vec<SearchMatch>> {
    if request.query.trim().is_empty() {
        return Err(RetrievalError::validation("search", "query must not be empty").into());
    }

    let query_vector = embedder.embed(&request.query).await.map_err(|e| {
        RetrievalError::gateway("search", format!("'{}': {}", request.query, e))
    })?;
    if query_vector.len() != store.dim() {
        return Err(RetrievalError::gateway(
            "search",
            format!(
                "query embedding dimension {} does not match store dimension {}",
                query_vector.len(),
                store.dim()
            ),
        )
        .into());
    }

    // Oversample: filtering and dedup below discard candidates, and
    // under-fetching would truncate legitimate results. The window is
    // intentionally bounded; very selective filters may return fewer
    // than `limit` matches.
    let k = request.limit * config.oversample;
    let candidates = store.nearest(&query_vector, k)?;
    debug!(query = %request.query, candidates = candidates.len(), "knn scan done");

    let tag_filter = request.tag_filter.to_lowercase();
    let type_filter = request.type_filter.to_lowercase();

    let mut results = Vec::new();
    let mut seen_paths: HashSet<String> = HashSet::new();

    for candidate in candidates {
        if !tag_filter.is_empty() && !candidate.tags.to_lowercase().contains(&tag_filter) {
            continue;
        }
        if !type_filter.is_empty() {
            let category = candidate.category.as_deref().unwrap_or("").to_lowercase();
            if category != type_filter {
                continue;
            }
        }

        // Candidates arrive nearest-first, so the first chunk seen for a
        // path is that document's best match.
        if !seen_paths.insert(candidate.path.clone()) {
            continue;
        }

        results.push(SearchMatch {
            path: candidate.path,
            summary: candidate.summary,
            relevance: round4(1.0 - candidate.distance),
            matched_section: candidate.kind,
            matched_content: preview(&candidate.content, config.preview_chars),
            tags: candidate.tags,
            date: candidate.date,
            category: candidate.category,
        });

        if results.len() >= request.limit {
            break;
        }
    }

    Ok(results)
}

fn round4(value: f32) -> f32 {
    ((value as f64 * 10_000.0).round() / 10_000.0) as f32
}

fn preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() > max_chars {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        content.to_string()
    }
}
