//! Quote Desk Core
//!
//! Layered architecture:
//! - domain: document types, numbering, currency, line items
//! - repository: key-value storage abstraction and typed document keys
//! - controller: document state machine driven by the view

pub mod config;
pub mod controller;
pub mod domain;
pub mod repository;

pub use config::ControllerConfig;
pub use controller::{
    Capabilities, Confirm, DeferredWrite, DocumentController, DocumentSnapshot, PendingAction,
    PrintSurface, RowView, Timer,
};
pub use domain::{ClientInfo, DocumentError, DocumentResult, DocumentType, LineField, LineItem, Money, StoreError, Totals};
pub use repository::{KeyValueStore, MemoryStore};
