pub mod chunking;
pub mod error;
pub mod models;
pub mod traits;

pub use error::RetrievalError;
pub use models::{Chunk, ChunkKind, SearchMatch};
pub use traits::Embedder;
