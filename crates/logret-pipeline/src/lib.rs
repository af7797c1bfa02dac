pub mod index;
pub mod search;

pub use index::{upsert_entry, UpsertInput};
pub use search::{search, SearchRequest};
