//! Domain Errors
//!
//! Error taxonomy for document operations and the backing store.

use thiserror::Error;

/// Common result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Failures of the persistent key-value store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Storage is not reachable at all (disabled, private mode, no window)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// A single write was rejected (quota, serialization)
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Document-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// Increment requested on a blank document number
    #[error("Document number is empty! Please enter a valid document number first.")]
    EmptyNumber,
    /// No digit run could be found in the document number
    #[error("Invalid document number format: {0:?}")]
    MalformedNumber(String),
    /// Row id does not exist in the current table
    #[error("Line item {0} not found")]
    ItemNotFound(u32),
    #[error(transparent)]
    Store(#[from] StoreError),
}
