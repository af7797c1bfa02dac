use serde::{Deserialize, Serialize};

/// Semantic label of a chunk. Fixed taxonomy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChunkKind {
    Summary,
    Details,
    Challenges,
    Other,
}

impl ChunkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkKind::Summary => "summary",
            ChunkKind::Details => "details",
            ChunkKind::Challenges => "challenges",
            ChunkKind::Other => "other",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "summary" => ChunkKind::Summary,
            "details" => ChunkKind::Details,
            "challenges" => ChunkKind::Challenges,
            _ => ChunkKind::Other,
        }
    }
}

impl std::fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chunk of a work-log body to be indexed.
/// This is a DTO; the embedding is attached by the pipeline before storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub kind: ChunkKind,
    pub content: String,
    pub embedding: Option<Vec<f32>>,
}

impl Chunk {
    pub fn new(kind: ChunkKind, content: String) -> Self {
        Self {
            kind,
            content,
            embedding: None,
        }
    }
}

/// One search result: a document surfaced via its best-scoring chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
    pub path: String,
    pub summary: String,
    /// `1 - distance`, rounded to 4 decimal places.
    pub relevance: f32,
    pub matched_section: ChunkKind,
    /// Preview of the matched chunk, cut at the configured length.
    pub matched_content: String,
    pub tags: String,
    pub date: Option<String>,
    pub category: Option<String>,
}
