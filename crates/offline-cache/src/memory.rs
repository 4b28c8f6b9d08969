//! In-Memory Cache Storage
//!
//! `CacheStorage` over nested maps, for tests and headless use.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use async_trait::async_trait;
use url::Url;

use crate::error::{CacheError, CacheResult};
use crate::fetch::Response;
use crate::traits::CacheStorage;

type Generation = BTreeMap<String, Response>;

#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    generations: RefCell<BTreeMap<String, Generation>>,
    fail_writes: Cell<bool>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a generation with entries
    pub fn with_generation<'a>(self, cache_name: &str, entries: impl IntoIterator<Item = (&'a str, Response)>) -> Self {
        self.generations.borrow_mut().insert(
            cache_name.to_string(),
            entries
                .into_iter()
                .map(|(url, response)| (url.to_string(), response))
                .collect(),
        );
        self
    }

    /// Make every subsequent write fail, e.g. to simulate a full quota
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of entries in a generation, `None` if it does not exist
    pub fn entry_count(&self, cache_name: &str) -> Option<usize> {
        self.generations.borrow().get(cache_name).map(BTreeMap::len)
    }

    pub fn names(&self) -> Vec<String> {
        self.generations.borrow().keys().cloned().collect()
    }
}

#[async_trait(?Send)]
impl CacheStorage for MemoryCacheStorage {
    async fn keys(&self) -> CacheResult<Vec<String>> {
        Ok(self.names())
    }

    async fn has(&self, cache_name: &str) -> CacheResult<bool> {
        Ok(self.generations.borrow().contains_key(cache_name))
    }

    async fn delete(&self, cache_name: &str) -> CacheResult<bool> {
        Ok(self.generations.borrow_mut().remove(cache_name).is_some())
    }

    async fn match_url(&self, cache_name: &str, url: &Url) -> CacheResult<Option<Response>> {
        Ok(self
            .generations
            .borrow()
            .get(cache_name)
            .and_then(|generation| generation.get(url.as_str()))
            .cloned())
    }

    async fn put(&self, cache_name: &str, url: &Url, response: &Response) -> CacheResult<()> {
        if self.fail_writes.get() {
            return Err(CacheError::Storage("quota exceeded".to_string()));
        }
        self.generations
            .borrow_mut()
            .entry(cache_name.to_string())
            .or_default()
            .insert(url.as_str().to_string(), response.clone());
        Ok(())
    }
}
