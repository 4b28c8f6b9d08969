//! Cache Layer - Core Traits
//!
//! Abstract cache storage and network access so the fetch policy can run
//! against the browser Cache API or in-memory fakes.

use async_trait::async_trait;
use url::Url;

use crate::error::CacheResult;
use crate::fetch::{Request, Response};

/// Named cache generations holding URL-keyed responses
#[async_trait(?Send)]
pub trait CacheStorage {
    /// Names of every existing generation
    async fn keys(&self) -> CacheResult<Vec<String>>;

    async fn has(&self, cache_name: &str) -> CacheResult<bool>;

    /// Drop a whole generation; returns whether it existed
    async fn delete(&self, cache_name: &str) -> CacheResult<bool>;

    /// Look a URL up in one generation
    async fn match_url(&self, cache_name: &str, url: &Url) -> CacheResult<Option<Response>>;

    /// Store a response, creating the generation if needed
    async fn put(&self, cache_name: &str, url: &Url, response: &Response) -> CacheResult<()>;

    /// Store a batch of responses
    async fn put_all(&self, cache_name: &str, entries: &[(Url, Response)]) -> CacheResult<()> {
        for (url, response) in entries {
            self.put(cache_name, url, response).await?;
        }
        Ok(())
    }
}

/// Outbound HTTP
#[async_trait(?Send)]
pub trait Network {
    /// Errors mean the request never produced a response (offline, DNS, CORS)
    async fn fetch(&self, request: &Request) -> CacheResult<Response>;
}

/// Lets several worker versions share one origin's storage
#[async_trait(?Send)]
impl<T: CacheStorage + ?Sized> CacheStorage for &T {
    async fn keys(&self) -> CacheResult<Vec<String>> {
        (**self).keys().await
    }

    async fn has(&self, cache_name: &str) -> CacheResult<bool> {
        (**self).has(cache_name).await
    }

    async fn delete(&self, cache_name: &str) -> CacheResult<bool> {
        (**self).delete(cache_name).await
    }

    async fn match_url(&self, cache_name: &str, url: &Url) -> CacheResult<Option<Response>> {
        (**self).match_url(cache_name, url).await
    }

    async fn put(&self, cache_name: &str, url: &Url, response: &Response) -> CacheResult<()> {
        (**self).put(cache_name, url, response).await
    }

    async fn put_all(&self, cache_name: &str, entries: &[(Url, Response)]) -> CacheResult<()> {
        (**self).put_all(cache_name, entries).await
    }
}
