//! Document Repository
//!
//! Typed access to the four persisted keys. Missing or unreadable values
//! resolve to their defaults instead of failing the page load.

use std::rc::Rc;

use crate::config::ControllerConfig;
use crate::domain::{ClientInfo, DocumentType, StoreError};
use super::traits::KeyValueStore;

pub const DOCUMENT_TYPE_KEY: &str = "documentType";
pub const CLIENT_INFO_KEY: &str = "lastClientInfo";

/// Store-backed persistence for document mode, numbers and client info
#[derive(Clone)]
pub struct DocumentRepository {
    store: Rc<dyn KeyValueStore>,
    default_quote_number: String,
    default_invoice_number: String,
}

impl DocumentRepository {
    pub fn new(store: Rc<dyn KeyValueStore>, config: &ControllerConfig) -> Self {
        Self {
            store,
            default_quote_number: config.default_quote_number.clone(),
            default_invoice_number: config.default_invoice_number.clone(),
        }
    }

    /// Read a key, treating an unavailable store like an empty one
    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("[store] read of {} failed: {}", key, e);
                None
            }
        }
    }

    pub fn document_type(&self) -> DocumentType {
        match self.read(DOCUMENT_TYPE_KEY) {
            Some(raw) => DocumentType::parse(&raw).unwrap_or_else(|| {
                log::warn!("[store] unknown document type {:?}, using quote", raw);
                DocumentType::default()
            }),
            None => DocumentType::default(),
        }
    }

    pub fn save_document_type(&self, doc_type: DocumentType) -> Result<(), StoreError> {
        self.store.set(DOCUMENT_TYPE_KEY, doc_type.as_str())
    }

    /// Last number for a mode, or its seed
    pub fn number(&self, doc_type: DocumentType) -> String {
        self.read(doc_type.number_key())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| match doc_type {
                DocumentType::Quote => self.default_quote_number.clone(),
                DocumentType::Invoice => self.default_invoice_number.clone(),
            })
    }

    pub fn save_number(&self, doc_type: DocumentType, number: &str) -> Result<(), StoreError> {
        self.store.set(doc_type.number_key(), number)
    }

    /// Saved client info; malformed JSON yields the empty record
    pub fn client_info(&self) -> ClientInfo {
        let Some(raw) = self.read(CLIENT_INFO_KEY) else {
            return ClientInfo::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("[store] ignoring malformed client info: {}", e);
            ClientInfo::default()
        })
    }

    pub fn save_client_info(&self, info: &ClientInfo) -> Result<(), StoreError> {
        let json = serde_json::to_string(info).map_err(|e| StoreError::Write {
            key: CLIENT_INFO_KEY.to_string(),
            reason: e.to_string(),
        })?;
        self.store.set(CLIENT_INFO_KEY, &json)
    }
}
