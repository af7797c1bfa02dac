//! Splits a work-log body into semantically labeled chunks.
//!
//! The summary always leads; body sections are introduced by `## ` headings
//! and classified by name. Ordering is significant: summary first, then
//! sections in document order.

use crate::models::{Chunk, ChunkKind};
use logret_config::ChunkingConfig;

pub struct SectionChunker {
    config: ChunkingConfig,
}

impl SectionChunker {
    pub fn new() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }

    pub fn with_config(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Split `body` into chunks, led by the caller-supplied `summary`.
    ///
    /// Body text before the first `## ` heading is dropped. Sections that are
    /// blank after trimming are dropped. Section content is hard-truncated at
    /// the configured character cap. An empty body yields exactly one chunk.
    pub fn split(&self, body: &str, summary: &str) -> Vec<Chunk> {
        let mut chunks = vec![Chunk::new(ChunkKind::Summary, summary.to_string())];

        for (name, content) in split_sections(body) {
            let content = content.trim();
            if content.is_empty() {
                continue;
            }
            let kind = classify_section(&name);
            chunks.push(Chunk::new(kind, truncate_chars(content, self.config.max_chunk_chars)));
        }

        chunks
    }
}

impl Default for SectionChunker {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan for lines that open a level-two heading (`## name`). Each heading
/// starts a section; the heading line carries the name, following lines up to
/// the next heading are the content. Deeper headings (`###`) do not split.
fn split_sections(body: &str) -> Vec<(String, String)> {
    let mut sections: Vec<(String, String)> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in body.lines() {
        if let Some(name) = heading_name(line) {
            if let Some((name, lines)) = current.take() {
                sections.push((name, lines.join("\n")));
            }
            current = Some((name.to_string(), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
        // Lines before the first heading are preamble and are dropped.
    }

    if let Some((name, lines)) = current.take() {
        sections.push((name, lines.join("\n")));
    }

    sections
}

/// Returns the trimmed heading name if `line` is exactly a level-two heading.
fn heading_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("##")?;
    // "###" and deeper must not match; require whitespace after the marker.
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Case-insensitive substring classification, first matching rule wins.
fn classify_section(name: &str) -> ChunkKind {
    let lower = name.to_lowercase();
    if lower.contains("detail") {
        ChunkKind::Details
    } else if lower.contains("challenge") || lower.contains("solution") {
        ChunkKind::Challenges
    } else {
        ChunkKind::Other
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}
