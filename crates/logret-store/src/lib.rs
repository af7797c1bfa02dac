pub mod schema;
pub mod store;
pub mod vector;

pub use store::{Candidate, DocumentRecord, LogStore};
