//! Local Storage
//!
//! `KeyValueStore` over `window.localStorage`.

use quote_core::{KeyValueStore, StoreError};
use web_sys::Storage;

use super::describe;

pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// Fails when storage is disabled (private mode, sandboxed iframe)
    pub fn open() -> Result<Self, StoreError> {
        let window = web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(describe(&e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".into()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(describe(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: describe(&e),
        })
    }
}
