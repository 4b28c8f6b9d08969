//! Document State Controller
//!
//! Owns the document mode, numbering, line items and client info.
//! Views read snapshots and call the operations below; the controller
//! persists through the repository and asks the host before destructive
//! actions.

mod capabilities;
mod debounce;
mod snapshot;

#[cfg(test)]
mod fakes;
#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::config::ControllerConfig;
use crate::domain::{
    needs_prefix, next_number, ClientInfo, DocumentError, DocumentResult, DocumentType, LineField,
    LineItem, Totals,
};
use crate::repository::{DocumentRepository, KeyValueStore};

pub use capabilities::{Confirm, PendingAction, PrintSurface};
pub use debounce::{DeferredWrite, Debouncer, Ticket, Timer};
pub use snapshot::{DocumentSnapshot, RowView};

/// Host-provided collaborators
#[derive(Clone)]
pub struct Capabilities {
    pub confirm: Rc<dyn Confirm>,
    pub timer: Rc<dyn Timer>,
    pub printer: Rc<dyn PrintSurface>,
}

/// Mutable application state
#[derive(Debug, Clone)]
struct DocumentState {
    doc_type: DocumentType,
    number: String,
    invoice_reference: String,
    items: Vec<LineItem>,
    next_item_id: u32,
    client: ClientInfo,
    issued_on: NaiveDate,
}

/// Controller handle; clones share the same state
#[derive(Clone)]
pub struct DocumentController {
    config: Rc<ControllerConfig>,
    repo: DocumentRepository,
    state: Rc<RefCell<DocumentState>>,
    caps: Capabilities,
    client_debounce: Debouncer,
    number_debounce: Debouncer,
}

impl DocumentController {
    /// Restore persisted state, then force-save client info and number
    ///
    /// Store failures at startup are logged, never fatal.
    pub fn load(
        config: ControllerConfig,
        store: Rc<dyn KeyValueStore>,
        caps: Capabilities,
        issued_on: NaiveDate,
    ) -> Self {
        let repo = DocumentRepository::new(store, &config);
        let doc_type = repo.document_type();
        let number = repo.number(doc_type);
        let invoice_reference = match doc_type {
            DocumentType::Invoice => number.clone(),
            DocumentType::Quote => String::new(),
        };
        let client = repo.client_info();

        log::info!("[doc] loaded {} {}", doc_type.as_str(), number);

        let controller = Self {
            client_debounce: Debouncer::new(config.client_save_delay()),
            number_debounce: Debouncer::new(config.number_save_delay()),
            config: Rc::new(config),
            repo,
            state: Rc::new(RefCell::new(DocumentState {
                doc_type,
                number,
                invoice_reference,
                items: Vec::new(),
                next_item_id: 1,
                client,
                issued_on,
            })),
            caps,
        };

        if let Err(e) = controller.commit_client_info() {
            log::warn!("[doc] startup client save failed: {}", e);
        }
        if let Err(e) = controller.save_number_now() {
            log::warn!("[doc] startup number save failed: {}", e);
        }
        controller
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn doc_type(&self) -> DocumentType {
        self.state.borrow().doc_type
    }

    pub fn number(&self) -> String {
        self.state.borrow().number.clone()
    }

    pub fn invoice_reference(&self) -> String {
        self.state.borrow().invoice_reference.clone()
    }

    pub fn items(&self) -> Vec<LineItem> {
        self.state.borrow().items.clone()
    }

    pub fn client_info(&self) -> ClientInfo {
        self.state.borrow().client.clone()
    }

    /// Totals derived fresh from the current rows
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.state.borrow().items, self.config.vat_rate)
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        let state = self.state.borrow();
        let symbol = &self.config.currency_symbol;
        let totals = Totals::compute(&state.items, self.config.vat_rate);

        DocumentSnapshot {
            doc_type: state.doc_type,
            title: state.doc_type.title(),
            title_class: state.doc_type.title_class(),
            shows_banking: state.doc_type.shows_banking(),
            shows_acceptance: state.doc_type.shows_acceptance(),
            number: state.number.clone(),
            invoice_reference: state.invoice_reference.clone(),
            issued_on: state.issued_on.format("%d/%m/%Y").to_string(),
            currency_symbol: symbol.clone(),
            rows: state
                .items
                .iter()
                .map(|item| RowView {
                    item: item.clone(),
                    line_total: item.line_total().to_string(),
                })
                .collect(),
            subtotal: totals.subtotal.to_string(),
            vat: totals.vat.to_string(),
            grand_total: totals.grand_total.to_string(),
            client: state.client.clone(),
        }
    }

    // ========================
    // Document Type
    // ========================

    /// Switch mode and persist it immediately
    ///
    /// Entering invoice mode copies the displayed number into the
    /// invoice reference.
    pub fn switch_type(&self, to: DocumentType) -> DocumentResult<()> {
        {
            let mut state = self.state.borrow_mut();
            if state.doc_type == to {
                return Ok(());
            }
            state.doc_type = to;
            if to == DocumentType::Invoice {
                state.invoice_reference = state.number.clone();
            }
        }
        log::info!("[doc] switched to {}", to.as_str());
        self.repo.save_document_type(to)?;
        Ok(())
    }

    // ========================
    // Numbering
    // ========================

    /// Bump the displayed number after confirmation
    ///
    /// Returns the new number, or `None` if the user declined or the
    /// document changed while the confirmation was pending.
    pub async fn increment_number(&self) -> DocumentResult<Option<String>> {
        let (doc_type, current) = {
            let state = self.state.borrow();
            (state.doc_type, state.number.clone())
        };
        let next = next_number(doc_type, &current, &self.config.invoice_prefix)?;

        let action = PendingAction::IncrementNumber {
            current: current.trim().to_string(),
            next: next.clone(),
        };
        if !self.caps.confirm.confirm(&action).await {
            return Ok(None);
        }

        {
            let mut state = self.state.borrow_mut();
            // Mode or number changed while the dialog was open
            if state.doc_type != doc_type || state.number != current {
                log::warn!("[doc] document changed during confirmation; increment dropped");
                return Ok(None);
            }
            state.number = next.clone();
            if state.doc_type == DocumentType::Invoice {
                state.invoice_reference = next.clone();
            }
        }
        self.number_debounce.cancel();
        self.repo.save_number(doc_type, &next)?;
        log::info!("[doc] number incremented to {}", next);
        Ok(Some(next))
    }

    /// Accept a hand-edited number
    ///
    /// In invoice mode a value missing the prefix may be corrected if the
    /// user agrees. Persistence is deferred until typing settles.
    pub async fn edit_number(&self, text: String) -> DocumentResult<DeferredWrite> {
        let doc_type = self.doc_type();
        let prefix = &self.config.invoice_prefix;
        let mut number = text;

        if doc_type == DocumentType::Invoice && needs_prefix(&number, prefix) {
            let current = number.trim().to_string();
            let with_prefix = format!("{}{}", prefix, current);
            let action = PendingAction::AddInvoicePrefix {
                current,
                with_prefix: with_prefix.clone(),
            };
            if self.caps.confirm.confirm(&action).await {
                number = with_prefix;
            }
        }

        {
            let mut state = self.state.borrow_mut();
            state.number = number.clone();
            if state.doc_type == DocumentType::Invoice {
                state.invoice_reference = number.clone();
            }
        }

        let repo = self.repo.clone();
        let ticket = self.number_debounce.schedule();
        Ok(DeferredWrite::new("number", ticket, self.caps.timer.clone(), move || {
            let number = number.trim();
            if number.is_empty() {
                return Ok(());
            }
            repo.save_number(doc_type, number)
        }))
    }

    /// Persist the displayed number under the active mode's key, if not blank
    pub fn save_number_now(&self) -> DocumentResult<()> {
        let (doc_type, number) = {
            let state = self.state.borrow();
            (state.doc_type, state.number.trim().to_string())
        };
        if !number.is_empty() {
            self.repo.save_number(doc_type, &number)?;
        }
        Ok(())
    }

    // ========================
    // Line Items
    // ========================

    /// Append a placeholder row; returns its id
    pub fn add_item(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.next_item_id;
        state.next_item_id += 1;
        state.items.push(LineItem::placeholder(id, &self.config.currency_symbol));
        Self::recompute(&mut state.items, &self.config.currency_symbol);
        id
    }

    /// Update one cell and recompute
    pub fn edit_item(&self, id: u32, field: LineField, text: String) -> DocumentResult<()> {
        let mut state = self.state.borrow_mut();
        let item = state
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(DocumentError::ItemNotFound(id))?;
        item.set(field, text);
        Self::recompute(&mut state.items, &self.config.currency_symbol);
        Ok(())
    }

    /// Remove a row after confirmation; returns whether it was removed
    pub async fn delete_item(&self, id: u32) -> DocumentResult<bool> {
        let label = self
            .state
            .borrow()
            .items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.label.clone())
            .ok_or(DocumentError::ItemNotFound(id))?;

        if !self.caps.confirm.confirm(&PendingAction::DeleteItem { label }).await {
            return Ok(false);
        }

        let mut state = self.state.borrow_mut();
        let before = state.items.len();
        state.items.retain(|item| item.id != id);
        if state.items.len() == before {
            return Err(DocumentError::ItemNotFound(id));
        }
        Self::recompute(&mut state.items, &self.config.currency_symbol);
        Ok(true)
    }

    /// Rewrite every rate into canonical currency text
    fn recompute(items: &mut [LineItem], currency_symbol: &str) {
        for item in items.iter_mut() {
            item.normalize_rate(currency_symbol);
        }
    }

    // ========================
    // Client Info
    // ========================

    /// Record typed client info; saves once typing settles
    pub fn client_input(&self, info: ClientInfo) -> DeferredWrite {
        self.state.borrow_mut().client = info.clone();
        let repo = self.repo.clone();
        DeferredWrite::new(
            "client",
            self.client_debounce.schedule(),
            self.caps.timer.clone(),
            move || repo.save_client_info(&info),
        )
    }

    /// Save client info now, dropping any pending deferred save
    pub fn commit_client_info(&self) -> DocumentResult<()> {
        self.client_debounce.cancel();
        let info = self.client_info();
        self.repo.save_client_info(&info)?;
        Ok(())
    }

    // ========================
    // Print
    // ========================

    /// Force-save client info, then print after confirmation
    pub async fn print(&self) -> DocumentResult<bool> {
        self.commit_client_info()?;
        if !self.caps.confirm.confirm(&PendingAction::Print).await {
            return Ok(false);
        }
        log::info!("[doc] printing {}", self.number());
        self.caps.printer.print();
        Ok(true)
    }
}
