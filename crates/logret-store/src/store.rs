//! SQLite-backed document/chunk/vector store.
//!
//! Upsert and delete run as single transactions so external readers never
//! observe a half-deleted document. The k-NN scan is exact: every stored
//! vector is compared against the query under cosine distance.

use crate::schema;
use crate::vector::{cosine_distance, decode_vector, encode_vector};
use logret_core::models::{Chunk, ChunkKind};
use logret_core::RetrievalError;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tracing::debug;

/// Metadata for a document about to be written.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub path: String,
    pub summary: String,
    pub tags: String,
    pub date: Option<String>,
    pub category: Option<String>,
}

/// One k-NN candidate, pre-joined to its chunk and document rows,
/// ordered by ascending distance.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub distance: f32,
    pub kind: ChunkKind,
    pub content: String,
    pub path: String,
    pub summary: String,
    pub tags: String,
    pub date: Option<String>,
    pub category: Option<String>,
}

pub struct LogStore {
    conn: Connection,
    dim: usize,
}

fn storage(operation: &'static str) -> impl Fn(rusqlite::Error) -> RetrievalError {
    move |e| RetrievalError::storage(operation, e.to_string())
}

impl LogStore {
    /// Open (or create) the database file. Does not create the schema;
    /// call [`ensure_ready`](Self::ensure_ready) before any other operation.
    pub fn open(db_path: &Path, dim: usize) -> Result<Self, RetrievalError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| RetrievalError::storage("open", e.to_string()))?;
            }
        }
        let conn = Connection::open(db_path).map_err(storage("open"))?;
        Ok(Self { conn, dim })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory(dim: usize) -> Result<Self, RetrievalError> {
        let conn = Connection::open_in_memory().map_err(storage("open"))?;
        Ok(Self { conn, dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Idempotent schema creation. Handles the file-exists-but-uninitialized
    /// case by re-running creation. Errors if the store was created with a
    /// different embedding dimension.
    pub fn ensure_ready(&self) -> Result<(), RetrievalError> {
        let initialized = schema::is_initialized(&self.conn).map_err(storage("ensure_ready"))?;
        if !initialized {
            debug!(dim = self.dim, "creating store schema");
            schema::create_all(&self.conn, self.dim).map_err(storage("ensure_ready"))?;
            return Ok(());
        }

        match schema::stored_dim(&self.conn).map_err(storage("ensure_ready"))? {
            Some(stored) if stored != self.dim => Err(RetrievalError::storage(
                "ensure_ready",
                format!(
                    "store was created with dimension {}, configured dimension is {}",
                    stored, self.dim
                ),
            )),
            // Pre-meta databases get the dimension pinned now.
            None => {
                schema::create_all(&self.conn, self.dim).map_err(storage("ensure_ready"))
            }
            Some(_) => Ok(()),
        }
    }

    /// Replace the document at `record.path` wholesale, as one transaction:
    /// cascade-delete any existing entry (embeddings, chunks, document), then
    /// insert the fresh document with its chunks and vectors in chunk order.
    /// Returns the number of chunks written.
    ///
    /// Every chunk must carry an embedding of the store dimension.
    pub fn replace_document(
        &mut self,
        record: &DocumentRecord,
        chunks: &[Chunk],
    ) -> Result<usize, RetrievalError> {
        for chunk in chunks {
            let embedding = chunk.embedding.as_deref().ok_or_else(|| {
                RetrievalError::storage("upsert", format!("chunk '{}' has no embedding", chunk.kind))
            })?;
            if embedding.len() != self.dim {
                return Err(RetrievalError::storage(
                    "upsert",
                    format!(
                        "chunk '{}' embedding has dimension {}, store expects {}",
                        chunk.kind,
                        embedding.len(),
                        self.dim
                    ),
                ));
            }
        }

        let tx = self.conn.transaction().map_err(storage("upsert"))?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM documents WHERE path = ?1",
                [&record.path],
                |row| row.get(0),
            )
            .optional()
            .map_err(storage("upsert"))?;

        if let Some(document_id) = existing {
            delete_cascade(&tx, document_id).map_err(storage("upsert"))?;
        }

        tx.execute(
            "INSERT INTO documents (path, summary, tags, entry_date, category)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.path,
                record.summary,
                record.tags,
                record.date,
                record.category
            ],
        )
        .map_err(storage("upsert"))?;
        let document_id = tx.last_insert_rowid();

        for chunk in chunks {
            tx.execute(
                "INSERT INTO chunks (document_id, kind, content) VALUES (?1, ?2, ?3)",
                params![document_id, chunk.kind.as_str(), chunk.content],
            )
            .map_err(storage("upsert"))?;
            let chunk_id = tx.last_insert_rowid();

            // Presence checked above.
            let embedding = chunk.embedding.as_deref().unwrap_or_default();
            tx.execute(
                "INSERT INTO embeddings (chunk_id, vector) VALUES (?1, ?2)",
                params![chunk_id, encode_vector(embedding)],
            )
            .map_err(storage("upsert"))?;
        }

        tx.commit().map_err(storage("upsert"))?;
        debug!(path = %record.path, chunks = chunks.len(), "document replaced");
        Ok(chunks.len())
    }

    /// Delete the document at `path` and everything it owns, in cascade
    /// order. Returns whether a document existed; missing is not an error.
    pub fn delete(&mut self, path: &str) -> Result<bool, RetrievalError> {
        let tx = self.conn.transaction().map_err(storage("delete"))?;

        let existing: Option<i64> = tx
            .query_row("SELECT id FROM documents WHERE path = ?1", [path], |row| {
                row.get(0)
            })
            .optional()
            .map_err(storage("delete"))?;

        let Some(document_id) = existing else {
            return Ok(false);
        };

        delete_cascade(&tx, document_id).map_err(storage("delete"))?;
        tx.commit().map_err(storage("delete"))?;
        debug!(path, "document deleted");
        Ok(true)
    }

    /// Exact k-NN scan over all embeddings: cosine distance against `query`,
    /// candidates returned nearest-first, at most `k`. An empty store yields
    /// an empty candidate list.
    pub fn nearest(&self, query: &[f32], k: usize) -> Result<Vec<Candidate>, RetrievalError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT e.vector, c.kind, c.content,
                        d.path, d.summary, d.tags, d.entry_date, d.category
                 FROM embeddings e
                 JOIN chunks c ON e.chunk_id = c.id
                 JOIN documents d ON c.document_id = d.id",
            )
            .map_err(storage("search"))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Vec<u8>>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, Option<String>>(6)?,
                    row.get::<_, Option<String>>(7)?,
                ))
            })
            .map_err(storage("search"))?;

        let mut candidates = Vec::new();
        for row in rows {
            let (blob, kind, content, path, summary, tags, date, category) =
                row.map_err(storage("search"))?;
            let stored = decode_vector(&blob, self.dim)?;
            candidates.push(Candidate {
                distance: cosine_distance(query, &stored),
                kind: ChunkKind::from_name(&kind),
                content,
                path,
                summary,
                tags: tags.unwrap_or_default(),
                date,
                category,
            });
        }

        candidates.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(k);
        Ok(candidates)
    }

    pub fn document_count(&self) -> Result<usize, RetrievalError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .map_err(storage("status"))?;
        Ok(count as usize)
    }

    pub fn chunk_count(&self) -> Result<usize, RetrievalError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))
            .map_err(storage("status"))?;
        Ok(count as usize)
    }

    /// Chunks and embeddings that still reference `path`. Used by tests to
    /// verify cascade completeness.
    pub fn counts_for_path(&self, path: &str) -> Result<(usize, usize), RetrievalError> {
        let chunks: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM chunks c
                 JOIN documents d ON c.document_id = d.id
                 WHERE d.path = ?1",
                [path],
                |row| row.get(0),
            )
            .map_err(storage("status"))?;
        let embeddings: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM embeddings e
                 JOIN chunks c ON e.chunk_id = c.id
                 JOIN documents d ON c.document_id = d.id
                 WHERE d.path = ?1",
                [path],
                |row| row.get(0),
            )
            .map_err(storage("status"))?;
        Ok((chunks as usize, embeddings as usize))
    }
}

/// Ordered cascade: embeddings, then chunks, then the document row.
fn delete_cascade(tx: &rusqlite::Transaction<'_>, document_id: i64) -> rusqlite::Result<()> {
    tx.execute(
        "DELETE FROM embeddings WHERE chunk_id IN
         (SELECT id FROM chunks WHERE document_id = ?1)",
        [document_id],
    )?;
    tx.execute("DELETE FROM chunks WHERE document_id = ?1", [document_id])?;
    tx.execute("DELETE FROM documents WHERE id = ?1", [document_id])?;
    Ok(())
}
