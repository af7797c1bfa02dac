use anyhow::{anyhow, Result};
use async_trait::async_trait;
use logret_config::{ChunkingConfig, SearchConfig};
use logret_core::models::ChunkKind;
use logret_core::traits::Embedder;
use logret_core::RetrievalError;
use logret_pipeline::{search, upsert_entry, SearchRequest, UpsertInput};
use logret_store::LogStore;

/// Keyword-driven embedder: texts about the same topic land on the same
/// axis, so distances are fully predictable.
struct MockEmbedder;

fn vector_for(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    if lower.contains("docker") {
        vec![1.0, 0.0, 0.0]
    } else if lower.contains("kubernetes") {
        vec![0.8, 0.6, 0.0]
    } else if lower.contains("postgres") {
        vec![0.0, 1.0, 0.0]
    } else {
        vec![0.0, 0.0, 1.0]
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| vector_for(t)).collect())
    }
}

struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(anyhow!("model unavailable"))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(anyhow!("model unavailable"))
    }
}

struct WrongDimEmbedder;

#[async_trait]
impl Embedder for WrongDimEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

fn input(path: &str, summary: &str, tags: &str, body: &str, category: Option<&str>) -> UpsertInput {
    UpsertInput {
        path: path.to_string(),
        summary: summary.to_string(),
        tags: tags.to_string(),
        body: body.to_string(),
        date: Some("2025-11-03".to_string()),
        category: category.map(|s| s.to_string()),
    }
}

fn request(query: &str, limit: usize) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        limit,
        tag_filter: String::new(),
        type_filter: String::new(),
    }
}

async fn seed(store: &mut LogStore) {
    let chunking = ChunkingConfig::default();
    upsert_entry(
        store,
        &MockEmbedder,
        &chunking,
        &input(
            "logs/docker.md",
            "migrated services to docker",
            "infra, docker",
            "## Details\ndocker compose rollout\n## Challenges\ndocker networking was flaky",
            Some("migration"),
        ),
    )
    .await
    .unwrap();
    upsert_entry(
        store,
        &MockEmbedder,
        &chunking,
        &input(
            "logs/postgres.md",
            "tuned postgres indexes",
            "db",
            "## Details\npostgres vacuum settings",
            Some("tuning"),
        ),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_upsert_then_search_end_to_end() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();
    seed(&mut store).await;

    let results = search(
        &store,
        &MockEmbedder,
        &SearchConfig::default(),
        &request("docker troubles", 5),
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].path, "logs/docker.md");
    assert_eq!(results[0].relevance, 1.0);
    assert!(results[0].relevance > results[1].relevance);
    assert_eq!(results[0].date.as_deref(), Some("2025-11-03"));
}

#[tokio::test]
async fn test_dedup_keeps_best_chunk_per_document() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();

    // Summary sits on the docker axis (distance 0 to the query); the details
    // chunk is nearby but strictly farther (kubernetes axis). Both rank in
    // the top candidates; the document must surface once, via the summary.
    upsert_entry(
        &mut store,
        &MockEmbedder,
        &ChunkingConfig::default(),
        &input(
            "logs/docker.md",
            "docker migration",
            "infra",
            "## Details\nkubernetes rollout notes",
            None,
        ),
    )
    .await
    .unwrap();

    let results = search(
        &store,
        &MockEmbedder,
        &SearchConfig::default(),
        &request("docker troubles", 5),
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, "logs/docker.md");
    assert_eq!(results[0].matched_section, ChunkKind::Summary);
}

#[tokio::test]
async fn test_tag_filter_is_case_insensitive_substring() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();
    seed(&mut store).await;

    let mut req = request("docker troubles", 5);
    req.tag_filter = "INFRA".to_string();
    let results = search(&store, &MockEmbedder, &SearchConfig::default(), &req)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, "logs/docker.md");
    assert!(results.iter().all(|r| r.tags.to_lowercase().contains("infra")));
}

#[tokio::test]
async fn test_type_filter_is_exact_equality() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();
    seed(&mut store).await;

    let mut req = request("docker troubles", 5);
    req.type_filter = "Tuning".to_string();
    let results = search(&store, &MockEmbedder, &SearchConfig::default(), &req)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, "logs/postgres.md");

    // "tun" is a substring but not equal; must not match.
    req.type_filter = "tun".to_string();
    let results = search(&store, &MockEmbedder, &SearchConfig::default(), &req)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_limit_truncates_results() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();
    let chunking = ChunkingConfig::default();
    for i in 0..4 {
        upsert_entry(
            &mut store,
            &MockEmbedder,
            &chunking,
            &input(&format!("logs/docker-{i}.md"), "docker work", "", "", None),
        )
        .await
        .unwrap();
    }

    let results = search(
        &store,
        &MockEmbedder,
        &SearchConfig::default(),
        &request("docker", 2),
    )
    .await
    .unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_empty_store_search_is_empty_not_fault() {
    let store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();

    let results = search(
        &store,
        &MockEmbedder,
        &SearchConfig::default(),
        &request("anything", 5),
    )
    .await
    .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_reindex_is_idempotent_via_pipeline() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();
    let chunking = ChunkingConfig::default();

    let first = upsert_entry(
        &mut store,
        &MockEmbedder,
        &chunking,
        &input(
            "logs/a.md",
            "docker work",
            "",
            "## Details\ndocker\n## Other\nmisc",
            None,
        ),
    )
    .await
    .unwrap();
    assert_eq!(first, 3);

    let second = upsert_entry(
        &mut store,
        &MockEmbedder,
        &chunking,
        &input("logs/a.md", "docker work, revised", "", "", None),
    )
    .await
    .unwrap();
    assert_eq!(second, 1);

    assert_eq!(store.document_count().unwrap(), 1);
    let (chunks, embeddings) = store.counts_for_path("logs/a.md").unwrap();
    assert_eq!((chunks, embeddings), (1, 1));
}

#[tokio::test]
async fn test_gateway_fault_leaves_previous_entry_intact() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();
    let chunking = ChunkingConfig::default();

    upsert_entry(
        &mut store,
        &MockEmbedder,
        &chunking,
        &input("logs/a.md", "docker work", "", "## Details\ndocker", None),
    )
    .await
    .unwrap();

    let err = upsert_entry(
        &mut store,
        &FailingEmbedder,
        &chunking,
        &input("logs/a.md", "replacement", "", "", None),
    )
    .await
    .unwrap_err();
    let retrieval = err.downcast_ref::<RetrievalError>().unwrap();
    assert!(matches!(retrieval, RetrievalError::Gateway { .. }));
    assert_eq!(retrieval.exit_code(), 3);

    // Old entry survives whole.
    assert_eq!(store.document_count().unwrap(), 1);
    let (chunks, embeddings) = store.counts_for_path("logs/a.md").unwrap();
    assert_eq!((chunks, embeddings), (2, 2));
}

#[tokio::test]
async fn test_dimension_mismatch_is_gateway_fault() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();

    let err = upsert_entry(
        &mut store,
        &WrongDimEmbedder,
        &ChunkingConfig::default(),
        &input("logs/a.md", "summary", "", "", None),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RetrievalError>().unwrap(),
        RetrievalError::Gateway { .. }
    ));

    // The same mismatch at search time is also a gateway fault.
    let err = search(
        &store,
        &WrongDimEmbedder,
        &SearchConfig::default(),
        &request("anything", 5),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RetrievalError>().unwrap(),
        RetrievalError::Gateway { .. }
    ));
}

#[tokio::test]
async fn test_validation_rejects_empty_summary_before_mutation() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();

    let err = upsert_entry(
        &mut store,
        &MockEmbedder,
        &ChunkingConfig::default(),
        &input("logs/a.md", "   ", "", "body", None),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RetrievalError>().unwrap(),
        RetrievalError::Validation { .. }
    ));
    assert_eq!(store.document_count().unwrap(), 0);
}

#[tokio::test]
async fn test_preview_truncated_with_ellipsis() {
    let mut store = LogStore::open_in_memory(3).unwrap();
    store.ensure_ready().unwrap();

    let long_section = format!("## Details\ndocker {}", "x".repeat(600));
    upsert_entry(
        &mut store,
        &MockEmbedder,
        &ChunkingConfig::default(),
        &input("logs/a.md", "unrelated topic", "", &long_section, None),
    )
    .await
    .unwrap();

    let results = search(
        &store,
        &MockEmbedder,
        &SearchConfig::default(),
        &request("docker", 5),
    )
    .await
    .unwrap();
    let hit = &results[0];
    assert_eq!(hit.matched_section, ChunkKind::Details);
    assert_eq!(hit.matched_content.chars().count(), 203);
    assert!(hit.matched_content.ends_with("..."));
}
