//! Document Snapshot
//!
//! Plain, render-ready copy of the controller state for the view layer.

use crate::domain::{ClientInfo, DocumentType, LineItem};

/// A table row with its derived total already formatted
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub item: LineItem,
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub doc_type: DocumentType,
    pub title: &'static str,
    pub title_class: Option<&'static str>,
    pub shows_banking: bool,
    pub shows_acceptance: bool,
    pub number: String,
    pub invoice_reference: String,
    /// Issue date, `dd/mm/yyyy`
    pub issued_on: String,
    pub currency_symbol: String,
    pub rows: Vec<RowView>,
    pub subtotal: String,
    pub vat: String,
    pub grand_total: String,
    pub client: ClientInfo,
}
