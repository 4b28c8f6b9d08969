//! Controller Tests
//!
//! DocumentController against the in-memory store and scripted host.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::fakes::Harness;
use super::{Confirm, DocumentController, PendingAction};
use crate::config::ControllerConfig;
use crate::domain::{ClientInfo, DocumentError, DocumentType, LineField, Money};
use crate::repository::{MemoryStore, CLIENT_INFO_KEY, DOCUMENT_TYPE_KEY};

const QUOTE_KEY: &str = "lastQuoteNumber";
const INVOICE_KEY: &str = "lastInvoiceNumber";

fn setup(store: MemoryStore) -> (Rc<MemoryStore>, Harness, DocumentController) {
    let store = Rc::new(store);
    let harness = Harness::new();
    let controller = DocumentController::load(
        ControllerConfig::default(),
        store.clone(),
        harness.capabilities(),
        NaiveDate::from_ymd_opt(2025, 8, 14).unwrap(),
    );
    (store, harness, controller)
}

// ========================
// Startup
// ========================

#[test]
fn test_first_load_uses_defaults_and_force_saves() {
    let (store, _, ctrl) = setup(MemoryStore::new());

    assert_eq!(ctrl.doc_type(), DocumentType::Quote);
    assert_eq!(ctrl.number(), "2508");
    assert_eq!(ctrl.invoice_reference(), "");
    assert!(ctrl.items().is_empty());
    assert_eq!(store.write_count(CLIENT_INFO_KEY), 1);
    assert_eq!(store.value(QUOTE_KEY).as_deref(), Some("2508"));
}

#[test]
fn test_load_restores_invoice_mode() {
    let store = MemoryStore::new()
        .with_value(DOCUMENT_TYPE_KEY, "invoice")
        .with_value(INVOICE_KEY, "INV-3100")
        .with_value(CLIENT_INFO_KEY, r#"{"name":"Acme","address":"1 Main Rd"}"#);
    let (_, _, ctrl) = setup(store);

    assert_eq!(ctrl.doc_type(), DocumentType::Invoice);
    assert_eq!(ctrl.number(), "INV-3100");
    assert_eq!(ctrl.invoice_reference(), "INV-3100");
    assert_eq!(ctrl.client_info(), ClientInfo::new("Acme", "1 Main Rd"));
}

#[test]
fn test_malformed_client_json_loads_empty_fields() {
    let (_, _, ctrl) = setup(MemoryStore::new().with_value(CLIENT_INFO_KEY, "[oops"));
    assert_eq!(ctrl.client_info(), ClientInfo::default());
}

#[test]
fn test_snapshot_reflects_mode() {
    let (_, _, ctrl) = setup(MemoryStore::new());
    let snap = ctrl.snapshot();
    assert_eq!(snap.title, "QUOTE");
    assert!(snap.shows_acceptance);
    assert!(!snap.shows_banking);
    assert_eq!(snap.issued_on, "14/08/2025");
    assert_eq!(snap.grand_total, "0.00");

    ctrl.switch_type(DocumentType::Invoice).unwrap();
    let snap = ctrl.snapshot();
    assert_eq!(snap.title, "INVOICE");
    assert_eq!(snap.title_class, Some("invoice-title"));
    assert!(snap.shows_banking);
    assert!(!snap.shows_acceptance);
}

// ========================
// Document Type
// ========================

#[test]
fn test_switch_to_invoice_copies_number_and_persists() {
    let (store, _, ctrl) = setup(MemoryStore::new());

    ctrl.switch_type(DocumentType::Invoice).unwrap();

    assert_eq!(ctrl.invoice_reference(), "2508");
    assert_eq!(ctrl.number(), "2508");
    assert_eq!(store.value(DOCUMENT_TYPE_KEY).as_deref(), Some("invoice"));
}

#[test]
fn test_switch_to_same_mode_is_noop() {
    let (store, _, ctrl) = setup(MemoryStore::new());
    ctrl.switch_type(DocumentType::Quote).unwrap();
    assert_eq!(store.write_count(DOCUMENT_TYPE_KEY), 0);
}

// ========================
// Numbering
// ========================

#[tokio::test]
async fn test_increment_quote_number() {
    let (store, harness, ctrl) = setup(MemoryStore::new());

    let next = ctrl.increment_number().await.unwrap();

    assert_eq!(next.as_deref(), Some("2509"));
    assert_eq!(store.value(QUOTE_KEY).as_deref(), Some("2509"));
    assert_eq!(
        harness.confirm.asked(),
        vec![PendingAction::IncrementNumber {
            current: "2508".to_string(),
            next: "2509".to_string()
        }]
    );
}

#[tokio::test]
async fn test_increment_invoice_number_mirrors_reference() {
    let store = MemoryStore::new()
        .with_value(DOCUMENT_TYPE_KEY, "invoice")
        .with_value(INVOICE_KEY, "INV-2508");
    let (store, _, ctrl) = setup(store);

    ctrl.increment_number().await.unwrap();

    assert_eq!(ctrl.number(), "INV-2509");
    assert_eq!(ctrl.invoice_reference(), "INV-2509");
    assert_eq!(store.value(INVOICE_KEY).as_deref(), Some("INV-2509"));
    assert_eq!(store.value(QUOTE_KEY), None);
}

#[tokio::test]
async fn test_increment_declined_leaves_state() {
    let (store, harness, ctrl) = setup(MemoryStore::new());
    harness.confirm.answer(false);

    assert_eq!(ctrl.increment_number().await.unwrap(), None);
    assert_eq!(ctrl.number(), "2508");
    assert_eq!(store.write_count(QUOTE_KEY), 1);
}

/// Switches the document to invoice mode while the dialog is open
#[derive(Default)]
struct SwitchWhileAsking {
    controller: RefCell<Option<DocumentController>>,
}

#[async_trait(?Send)]
impl Confirm for SwitchWhileAsking {
    async fn confirm(&self, _action: &PendingAction) -> bool {
        if let Some(ctrl) = self.controller.borrow().as_ref() {
            ctrl.switch_type(DocumentType::Invoice).unwrap();
        }
        true
    }
}

#[tokio::test]
async fn test_increment_dropped_when_mode_changes_mid_confirm() {
    let store = Rc::new(MemoryStore::new());
    let confirm = Rc::new(SwitchWhileAsking::default());
    let mut caps = Harness::new().capabilities();
    caps.confirm = confirm.clone();
    let ctrl = DocumentController::load(
        ControllerConfig::default(),
        store.clone(),
        caps,
        NaiveDate::from_ymd_opt(2025, 8, 14).unwrap(),
    );
    *confirm.controller.borrow_mut() = Some(ctrl.clone());

    assert_eq!(ctrl.increment_number().await.unwrap(), None);
    assert_eq!(ctrl.doc_type(), DocumentType::Invoice);
    assert_eq!(ctrl.number(), "2508");
    assert_eq!(store.value(QUOTE_KEY).as_deref(), Some("2508"));
    assert_eq!(store.value(INVOICE_KEY), None);
}

#[tokio::test]
async fn test_increment_numberless_invoice_is_rejected() {
    let (store, harness, ctrl) = setup(MemoryStore::new());
    ctrl.switch_type(DocumentType::Invoice).unwrap();
    // Decline the prefix offer so the text stays as typed
    harness.confirm.answer(false);
    ctrl.edit_number("DRAFT".to_string()).await.unwrap();
    let writes_before = store.write_count(INVOICE_KEY);

    let result = ctrl.increment_number().await;

    assert_eq!(result, Err(DocumentError::MalformedNumber("DRAFT".to_string())));
    assert_eq!(ctrl.number(), "DRAFT");
    assert_eq!(store.write_count(INVOICE_KEY), writes_before);
    // Only the prefix question was asked
    assert_eq!(harness.confirm.asked().len(), 1);
}

#[tokio::test]
async fn test_increment_empty_number_is_refused() {
    let (_, harness, ctrl) = setup(MemoryStore::new());
    ctrl.edit_number("   ".to_string()).await.unwrap();

    assert_eq!(ctrl.increment_number().await, Err(DocumentError::EmptyNumber));
    assert!(harness.confirm.asked().is_empty());
}

#[tokio::test]
async fn test_edit_invoice_number_offers_prefix() {
    let (store, harness, ctrl) = setup(MemoryStore::new());
    ctrl.switch_type(DocumentType::Invoice).unwrap();

    let write = ctrl.edit_number("2600".to_string()).await.unwrap();
    assert!(write.run().await.unwrap());

    assert_eq!(ctrl.number(), "INV-2600");
    assert_eq!(ctrl.invoice_reference(), "INV-2600");
    assert_eq!(store.value(INVOICE_KEY).as_deref(), Some("INV-2600"));
    assert!(matches!(harness.confirm.asked()[0], PendingAction::AddInvoicePrefix { .. }));
}

#[tokio::test]
async fn test_edit_quote_number_is_verbatim_and_debounced() {
    let (store, harness, ctrl) = setup(MemoryStore::new());
    let baseline = store.write_count(QUOTE_KEY);

    let first = ctrl.edit_number("26".to_string()).await.unwrap();
    let second = ctrl.edit_number("2600".to_string()).await.unwrap();

    assert!(!first.run().await.unwrap());
    assert!(second.run().await.unwrap());
    assert_eq!(store.write_count(QUOTE_KEY), baseline + 1);
    assert_eq!(store.value(QUOTE_KEY).as_deref(), Some("2600"));
    assert!(harness.confirm.asked().is_empty());
}

#[tokio::test]
async fn test_increment_supersedes_pending_number_edit() {
    let (store, _, ctrl) = setup(MemoryStore::new());

    let pending = ctrl.edit_number("3000".to_string()).await.unwrap();
    ctrl.increment_number().await.unwrap();

    assert!(!pending.run().await.unwrap());
    assert_eq!(store.value(QUOTE_KEY).as_deref(), Some("3001"));
}

// ========================
// Line Items
// ========================

#[test]
fn test_add_item_appends_placeholder() {
    let (_, _, ctrl) = setup(MemoryStore::new());
    let first = ctrl.add_item();
    let second = ctrl.add_item();

    assert_ne!(first, second);
    let items = ctrl.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].label, "Item");
    assert_eq!(items[0].quantity, "1");
    assert_eq!(items[0].rate, "R 0.00");
    assert_eq!(ctrl.totals().grand_total, Money::ZERO);
}

#[test]
fn test_edit_recomputes_and_normalizes_rate() {
    let (_, _, ctrl) = setup(MemoryStore::new());
    let id = ctrl.add_item();

    ctrl.edit_item(id, LineField::Rate, "12.5".to_string()).unwrap();
    ctrl.edit_item(id, LineField::Quantity, "4".to_string()).unwrap();

    let snap = ctrl.snapshot();
    assert_eq!(snap.rows[0].item.rate, "R 12.50");
    assert_eq!(snap.rows[0].line_total, "50.00");
    assert_eq!(snap.subtotal, "50.00");
    assert_eq!(snap.vat, "7.50");
    assert_eq!(snap.grand_total, "57.50");
}

#[test]
fn test_huge_rate_saturates_totals() {
    let (_, _, ctrl) = setup(MemoryStore::new());
    let id = ctrl.add_item();

    ctrl.edit_item(id, LineField::Rate, "99999999999999999999".to_string()).unwrap();

    let totals = ctrl.totals();
    assert_eq!(totals.grand_total, Money::from_cents(i64::MAX));
    assert!(!ctrl.snapshot().grand_total.starts_with('-'));
}

#[test]
fn test_trailing_dot_in_rate_keeps_amount() {
    let (_, _, ctrl) = setup(MemoryStore::new());
    let id = ctrl.add_item();

    ctrl.edit_item(id, LineField::Rate, "12.50.".to_string()).unwrap();

    assert_eq!(ctrl.items()[0].rate, "R 12.50");
    assert_eq!(ctrl.snapshot().grand_total, "14.38");
}

#[test]
fn test_edit_unknown_item() {
    let (_, _, ctrl) = setup(MemoryStore::new());
    assert_eq!(
        ctrl.edit_item(42, LineField::Label, "x".to_string()),
        Err(DocumentError::ItemNotFound(42))
    );
}

#[tokio::test]
async fn test_delete_item_requires_confirmation() {
    let (_, harness, ctrl) = setup(MemoryStore::new());
    let keep = ctrl.add_item();
    let gone = ctrl.add_item();
    ctrl.edit_item(keep, LineField::Rate, "100".to_string()).unwrap();
    ctrl.edit_item(gone, LineField::Rate, "900".to_string()).unwrap();

    harness.confirm.answer(false);
    assert!(!ctrl.delete_item(gone).await.unwrap());
    assert_eq!(ctrl.items().len(), 2);
    assert_eq!(ctrl.totals().subtotal, Money::from_cents(100000));

    assert!(ctrl.delete_item(gone).await.unwrap());
    assert_eq!(ctrl.items().len(), 1);
    assert_eq!(ctrl.totals().subtotal, Money::from_cents(10000));
    assert_eq!(ctrl.totals().grand_total, Money::from_cents(11500));
}

#[tokio::test]
async fn test_delete_unknown_item_asks_nothing() {
    let (_, harness, ctrl) = setup(MemoryStore::new());
    assert_eq!(ctrl.delete_item(9).await, Err(DocumentError::ItemNotFound(9)));
    assert!(harness.confirm.asked().is_empty());
}

// ========================
// Client Info
// ========================

#[tokio::test]
async fn test_idle_client_input_persists_once() {
    let (store, _, ctrl) = setup(MemoryStore::new());
    let baseline = store.write_count(CLIENT_INFO_KEY);

    let write = ctrl.client_input(ClientInfo::new("Acme", ""));
    assert!(write.run().await.unwrap());

    assert_eq!(store.write_count(CLIENT_INFO_KEY), baseline + 1);
}

#[tokio::test]
async fn test_rapid_client_edits_collapse_to_last() {
    let (store, _, ctrl) = setup(MemoryStore::new());
    let baseline = store.write_count(CLIENT_INFO_KEY);

    let writes = vec![
        ctrl.client_input(ClientInfo::new("A", "")),
        ctrl.client_input(ClientInfo::new("Ac", "")),
        ctrl.client_input(ClientInfo::new("Acme", "1 Main Rd")),
    ];
    for write in writes {
        write.run().await.unwrap();
    }

    assert_eq!(store.write_count(CLIENT_INFO_KEY), baseline + 1);
    let saved: ClientInfo = serde_json::from_str(&store.value(CLIENT_INFO_KEY).unwrap()).unwrap();
    assert_eq!(saved, ClientInfo::new("Acme", "1 Main Rd"));
}

#[tokio::test]
async fn test_commit_cancels_pending_client_write() {
    let (store, _, ctrl) = setup(MemoryStore::new());
    let baseline = store.write_count(CLIENT_INFO_KEY);

    let pending = ctrl.client_input(ClientInfo::new("Acme", ""));
    ctrl.commit_client_info().unwrap();

    assert!(!pending.run().await.unwrap());
    assert_eq!(store.write_count(CLIENT_INFO_KEY), baseline + 1);
}

// ========================
// Print
// ========================

#[tokio::test]
async fn test_print_saves_client_then_prints() {
    let (store, harness, ctrl) = setup(MemoryStore::new());
    let _ = ctrl.client_input(ClientInfo::new("Acme", "1 Main Rd"));

    assert!(ctrl.print().await.unwrap());

    assert_eq!(harness.printer.prints.get(), 1);
    assert_eq!(harness.confirm.asked(), vec![PendingAction::Print]);
    assert!(store.value(CLIENT_INFO_KEY).unwrap().contains("Acme"));
}

#[tokio::test]
async fn test_print_declined_still_saves_client() {
    let (store, harness, ctrl) = setup(MemoryStore::new());
    let baseline = store.write_count(CLIENT_INFO_KEY);
    harness.confirm.answer(false);

    assert!(!ctrl.print().await.unwrap());

    assert_eq!(harness.printer.prints.get(), 0);
    assert_eq!(store.write_count(CLIENT_INFO_KEY), baseline + 1);
}
