//! Fault taxonomy for store, gateway and pipeline operations
//!
//! NotFound is deliberately absent: a missing document is a boolean/empty
//! outcome, not an error. Every fault carries the operation name and enough
//! context for the caller to report it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Malformed input rejected before any storage mutation.
    #[error("invalid input for {operation}: {message}")]
    Validation { operation: String, message: String },

    /// Failure initializing, reading or writing the persisted store.
    #[error("storage failure during {operation}: {message}")]
    Storage { operation: String, message: String },

    /// Embedding gateway unavailable or misconfigured. Not retried.
    #[error("embedding gateway failure during {operation}: {message}")]
    Gateway { operation: String, message: String },
}

impl RetrievalError {
    pub fn validation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        RetrievalError::Validation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        RetrievalError::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn gateway(operation: impl Into<String>, message: impl Into<String>) -> Self {
        RetrievalError::Gateway {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Process exit code for the CLI. Storage and gateway faults get distinct
    /// codes so callers can tell them apart; validation shares the generic
    /// failure code with not-found.
    pub fn exit_code(&self) -> i32 {
        match self {
            RetrievalError::Validation { .. } => 1,
            RetrievalError::Storage { .. } => 2,
            RetrievalError::Gateway { .. } => 3,
        }
    }
}
