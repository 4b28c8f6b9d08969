//! Offline Cache Manager
//!
//! Runs the worker lifecycle against a cache storage and a network:
//! precache on install, prune on activate, cache-first on fetch.

use futures::future::join_all;
use http::Method;
use url::Url;

use crate::error::{CacheError, CacheResult};
use crate::fetch::{FetchOutcome, Request, Response, ResponseSource};
use crate::lifecycle::{Lifecycle, WorkerState};
use crate::manifest::CacheManifest;
use crate::message::{MessageAction, VersionReply, WorkerMessage};
use crate::traits::{CacheStorage, Network};

/// One worker version's view of the offline cache
pub struct OfflineCacheManager<C: CacheStorage, N: Network> {
    manifest: CacheManifest,
    scope: Url,
    storage: C,
    network: N,
    lifecycle: Lifecycle,
}

impl<C: CacheStorage, N: Network> OfflineCacheManager<C, N> {
    pub fn new(manifest: CacheManifest, scope: Url, storage: C, network: N) -> Self {
        Self {
            manifest,
            scope,
            storage,
            network,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn manifest(&self) -> &CacheManifest {
        &self.manifest
    }

    pub fn state(&self) -> WorkerState {
        self.lifecycle.state()
    }

    pub fn storage(&self) -> &C {
        &self.storage
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    // ========================
    // Install
    // ========================

    /// Precache every manifest asset as one unit
    ///
    /// On success the caller should skip waiting so the new version can
    /// activate immediately. On failure the worker is redundant and the
    /// previous generation stays authoritative.
    pub async fn install(&self) -> CacheResult<usize> {
        log::info!("[sw {}] installing", self.manifest.version);
        self.lifecycle.transition(WorkerState::Installing)?;

        match self.precache().await {
            Ok(count) => {
                self.lifecycle.transition(WorkerState::Installed)?;
                log::info!("[sw] cached {} assets into {}", count, self.manifest.cache_name);
                Ok(count)
            }
            Err(e) => {
                self.lifecycle.transition(WorkerState::Redundant)?;
                log::error!("[sw] installation failed: {}", e);
                Err(e)
            }
        }
    }

    async fn precache(&self) -> CacheResult<usize> {
        let urls = self.manifest.resolve(&self.scope)?;
        let requests: Vec<Request> = urls.into_iter().map(Request::get).collect();
        let results = join_all(requests.iter().map(|request| self.network.fetch(request))).await;

        let mut entries = Vec::with_capacity(requests.len());
        for (request, result) in requests.into_iter().zip(results) {
            let asset = request.url.to_string();
            let response = result.map_err(|e| CacheError::InstallFailed {
                asset: asset.clone(),
                reason: e.to_string(),
            })?;
            if !response.status.is_success() {
                return Err(CacheError::InstallFailed {
                    asset,
                    reason: format!("HTTP {}", response.status),
                });
            }
            entries.push((request.url, response));
        }

        let cache_name = &self.manifest.cache_name;
        let existed = self.storage.has(cache_name).await?;
        if let Err(e) = self.storage.put_all(cache_name, &entries).await {
            // Roll back a half-written generation we created ourselves
            if !existed {
                let _ = self.storage.delete(cache_name).await;
            }
            return Err(e);
        }
        Ok(entries.len())
    }

    // ========================
    // Activate
    // ========================

    /// Delete every generation but the current one
    ///
    /// Returns the pruned names. The caller should then claim open clients.
    pub async fn activate(&self) -> CacheResult<Vec<String>> {
        log::info!("[sw {}] activating", self.manifest.version);
        self.lifecycle.transition(WorkerState::Activating)?;

        match self.prune().await {
            Ok(deleted) => {
                self.lifecycle.transition(WorkerState::Activated)?;
                log::info!("[sw] activation complete");
                Ok(deleted)
            }
            Err(e) => {
                self.lifecycle.transition(WorkerState::Redundant)?;
                log::error!("[sw] activation failed: {}", e);
                Err(e)
            }
        }
    }

    async fn prune(&self) -> CacheResult<Vec<String>> {
        let mut deleted = Vec::new();
        for name in self.storage.keys().await? {
            if name == self.manifest.cache_name {
                continue;
            }
            log::info!("[sw] deleting old cache: {}", name);
            if self.storage.delete(&name).await? {
                deleted.push(name);
            }
        }
        Ok(deleted)
    }

    // ========================
    // Fetch
    // ========================

    /// Same-origin GETs only; everything else goes straight to the network
    pub fn should_intercept(&self, request: &Request) -> bool {
        request.method == Method::GET && request.url.origin() == self.scope.origin()
    }

    /// Cache-first with network fallback; never fails
    pub async fn handle_fetch(&self, request: &Request) -> FetchOutcome {
        if !self.should_intercept(request) {
            return FetchOutcome::Passthrough;
        }
        let cache_name = &self.manifest.cache_name;

        match self.storage.match_url(cache_name, &request.url).await {
            Ok(Some(hit)) => return FetchOutcome::Respond(hit, ResponseSource::Cache),
            Ok(None) => {}
            Err(e) => log::warn!("[sw] cache lookup for {} failed: {}", request.url, e),
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    if let Err(e) = self.storage.put(cache_name, &request.url, &response).await {
                        log::warn!("[sw] could not cache {}: {}", request.url, e);
                    }
                }
                FetchOutcome::Respond(response, ResponseSource::Network)
            }
            Err(e) => {
                log::debug!("[sw] network failed for {}: {}", request.url, e);
                self.offline_fallback(request).await
            }
        }
    }

    async fn offline_fallback(&self, request: &Request) -> FetchOutcome {
        if request.accepts_html() {
            if let Some(shell) = self.cached_shell().await {
                return FetchOutcome::Respond(shell, ResponseSource::Shell);
            }
        }
        FetchOutcome::Respond(Response::offline(), ResponseSource::Offline)
    }

    async fn cached_shell(&self) -> Option<Response> {
        let url = self.manifest.shell_url(&self.scope).ok()?;
        match self.storage.match_url(&self.manifest.cache_name, &url).await {
            Ok(shell) => shell,
            Err(e) => {
                log::warn!("[sw] shell lookup failed: {}", e);
                None
            }
        }
    }

    // ========================
    // Messages
    // ========================

    pub fn handle_message(&self, message: WorkerMessage) -> MessageAction {
        match message {
            WorkerMessage::GetVersion => MessageAction::Reply(VersionReply {
                version: self.manifest.version.clone(),
            }),
            WorkerMessage::SkipWaiting => MessageAction::SkipWaiting,
        }
    }
}
