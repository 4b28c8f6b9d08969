//! Domain Layer
//!
//! Document entities and the rules derived from them.
//! This layer has NO storage or browser dependencies.

mod error;
mod currency;
mod document_type;
mod document_number;
mod line_item;
mod client_info;

pub use error::{DocumentError, DocumentResult, StoreError};
pub use currency::{parse_number, Money};
pub use document_type::DocumentType;
pub use document_number::{first_digit_run, format_number, needs_prefix, next_number};
pub use line_item::{LineField, LineItem, Totals};
pub use client_info::ClientInfo;
