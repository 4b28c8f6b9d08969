//! Document Type
//!
//! The two mutually exclusive document modes and everything the view
//! derives from the active one.

use serde::{Deserialize, Serialize};

/// Document mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Bare-digit numbering, acceptance section visible
    #[default]
    Quote,
    /// `INV-` numbering, banking details visible
    Invoice,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Quote => "quote",
            DocumentType::Invoice => "invoice",
        }
    }

    /// Parse a stored value; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "quote" => Some(DocumentType::Quote),
            "invoice" => Some(DocumentType::Invoice),
            _ => None,
        }
    }

    /// Heading text shown on the document
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::Quote => "QUOTE",
            DocumentType::Invoice => "INVOICE",
        }
    }

    /// Extra CSS class on the title element
    pub fn title_class(&self) -> Option<&'static str> {
        match self {
            DocumentType::Quote => None,
            DocumentType::Invoice => Some("invoice-title"),
        }
    }

    pub fn shows_banking(&self) -> bool {
        *self == DocumentType::Invoice
    }

    pub fn shows_acceptance(&self) -> bool {
        *self == DocumentType::Quote
    }

    /// Store key holding the last number for this mode
    pub fn number_key(&self) -> &'static str {
        match self {
            DocumentType::Quote => "lastQuoteNumber",
            DocumentType::Invoice => "lastInvoiceNumber",
        }
    }
}
