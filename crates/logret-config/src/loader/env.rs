//! Environment variable configuration overlay
//!
//! Supported variables:
//! - `LOGRET_DB_PATH=path/to/store.db`
//! - `LOGRET_EMBEDDING_BACKEND=external|ollama|hash`
//! - `LOGRET_EMBEDDING_MODEL=model-name`
//! - `LOGRET_EMBEDDING_DIM=384`
//! - `LOGRET_SEARCH_LIMIT=10`

use crate::{error::ConfigError, Config, EmbeddingBackend, Result};
use std::env;
use std::path::PathBuf;

/// Apply `LOGRET_*` environment variables on top of an existing config.
pub fn apply_env(config: &mut Config) -> Result<()> {
    if let Ok(path) = env::var("LOGRET_DB_PATH") {
        config.store.db_path = PathBuf::from(path);
    }

    if let Ok(backend) = env::var("LOGRET_EMBEDDING_BACKEND") {
        config.embedding.backend = parse_backend(&backend)?;
    }

    if let Ok(model) = env::var("LOGRET_EMBEDDING_MODEL") {
        config.embedding.model_name = model;
    }

    if let Ok(dim) = env::var("LOGRET_EMBEDDING_DIM") {
        config.embedding.dim = parse_usize("LOGRET_EMBEDDING_DIM", &dim)?;
    }

    if let Ok(limit) = env::var("LOGRET_SEARCH_LIMIT") {
        config.search.default_limit = parse_usize("LOGRET_SEARCH_LIMIT", &limit)?;
    }

    Ok(())
}

fn parse_backend(value: &str) -> Result<EmbeddingBackend> {
    match value.to_lowercase().as_str() {
        "external" | "openai" => Ok(EmbeddingBackend::External),
        "ollama" => Ok(EmbeddingBackend::Ollama),
        "hash" => Ok(EmbeddingBackend::Hash),
        other => Err(ConfigError::EnvVarError {
            var: "LOGRET_EMBEDDING_BACKEND".to_string(),
            message: format!("unknown backend '{}' (expected external, ollama or hash)", other),
        }),
    }
}

fn parse_usize(var: &str, value: &str) -> Result<usize> {
    value.parse::<usize>().map_err(|e| ConfigError::EnvVarError {
        var: var.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_values() {
        assert_eq!(parse_backend("hash").unwrap(), EmbeddingBackend::Hash);
        assert_eq!(parse_backend("OLLAMA").unwrap(), EmbeddingBackend::Ollama);
        assert_eq!(parse_backend("openai").unwrap(), EmbeddingBackend::External);
        assert!(parse_backend("gguf").is_err());
    }

    #[test]
    fn test_parse_usize_rejects_garbage() {
        assert_eq!(parse_usize("X", "42").unwrap(), 42);
        assert!(parse_usize("X", "forty-two").is_err());
    }
}
