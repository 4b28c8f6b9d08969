//! Offline Cache
//!
//! Versioned app-shell cache for the quote desk service worker.
//!
//! The manager is generic over `CacheStorage` and `Network` so the
//! install, activate and fetch policy runs natively in tests. The
//! `worker` module binds it to the browser on wasm32.

mod error;
mod fetch;
mod lifecycle;
mod manager;
mod manifest;
mod memory;
mod message;
mod traits;


#[cfg(target_arch = "wasm32")]
mod worker;

pub use error::{CacheError, CacheResult};
pub use fetch::{FetchOutcome, Request, Response, ResponseKind, ResponseSource, OFFLINE_MESSAGE};
pub use lifecycle::{Lifecycle, WorkerState};
pub use manager::OfflineCacheManager;
pub use manifest::{CacheManifest, ICON_SIZES};
pub use memory::MemoryCacheStorage;
pub use message::{MessageAction, VersionReply, WorkerMessage};
pub use traits::{CacheStorage, Network};
