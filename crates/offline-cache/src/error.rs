//! Cache Errors

use thiserror::Error;

use crate::lifecycle::WorkerState;

pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// One manifest asset could not be fetched; nothing was committed
    #[error("install failed on {asset}: {reason}")]
    InstallFailed { asset: String, reason: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("cache storage error: {0}")]
    Storage(String),
    #[error("invalid lifecycle transition {from:?} -> {to:?}")]
    InvalidState { from: WorkerState, to: WorkerState },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}
