//! Repository Layer - Core Traits
//!
//! Durable, origin-scoped string storage.
//! Implementations can use browser local storage, in-memory maps, etc.

use crate::domain::StoreError;

/// Minimal string key-value store
///
/// Synchronous to match browser local storage semantics.
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
