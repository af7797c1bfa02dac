//! Table definitions and lifecycle.
//!
//! Three tables in a strict ownership hierarchy (documents 1-* chunks 1-1
//! embeddings) plus a `meta` table that pins the embedding dimension at
//! schema-creation time. Deletion never relies on engine-level cascade
//! triggers; the store issues explicit ordered deletes.

use rusqlite::Connection;

const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    path TEXT UNIQUE NOT NULL,
    summary TEXT NOT NULL,
    tags TEXT,
    entry_date TEXT,
    category TEXT,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP,
    updated_at TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS chunks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    document_id INTEGER NOT NULL REFERENCES documents(id),
    kind TEXT NOT NULL,
    content TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS embeddings (
    chunk_id INTEGER PRIMARY KEY REFERENCES chunks(id),
    vector BLOB NOT NULL
);

CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_documents_date ON documents(entry_date);
CREATE INDEX IF NOT EXISTS idx_documents_category ON documents(category);
CREATE INDEX IF NOT EXISTS idx_chunks_document ON chunks(document_id);
";

/// True when the schema has been created. A database file that exists but has
/// no `documents` table (e.g. left by a crashed prior run) reports false.
pub fn is_initialized(conn: &Connection) -> rusqlite::Result<bool> {
    table_exists(conn, "documents")
}

fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Create all tables and indexes, recording the embedding dimension.
/// Safe to re-run; everything is IF NOT EXISTS.
pub fn create_all(conn: &Connection, dim: usize) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_TABLES)?;
    conn.execute(
        "INSERT OR IGNORE INTO meta (key, value) VALUES ('embedding_dim', ?1)",
        [dim.to_string()],
    )?;
    Ok(())
}

/// Dimension recorded at schema-creation time, if any. A crash between table
/// creations can leave `documents` without `meta`; that reads as "no pinned
/// dimension" so the caller re-runs creation rather than failing.
pub fn stored_dim(conn: &Connection) -> rusqlite::Result<Option<usize>> {
    if !table_exists(conn, "meta")? {
        return Ok(None);
    }
    let mut stmt = conn.prepare("SELECT value FROM meta WHERE key = 'embedding_dim'")?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => {
            let value: String = row.get(0)?;
            Ok(value.parse::<usize>().ok())
        }
        None => Ok(None),
    }
}
