//! Repository Layer
//!
//! Key-value store abstraction, an in-memory implementation, and
//! typed access to the persisted document keys.

mod traits;
mod memory;
mod document_repo;


pub use traits::KeyValueStore;
pub use memory::MemoryStore;
pub use document_repo::{DocumentRepository, CLIENT_INFO_KEY, DOCUMENT_TYPE_KEY};
