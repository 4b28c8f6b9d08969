//! Host Capabilities
//!
//! What the controller needs from its host besides storage: a way to ask
//! the user before destructive actions and a way to print.

use std::fmt;

use async_trait::async_trait;

/// An action awaiting the user's go-ahead
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteItem { label: String },
    IncrementNumber { current: String, next: String },
    AddInvoicePrefix { current: String, with_prefix: String },
    Print,
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingAction::DeleteItem { label } => {
                write!(f, "Are you sure you want to delete \"{}\"?", label)
            }
            PendingAction::IncrementNumber { current, next } => write!(
                f,
                "Are you sure you want to increment the document number?\n\nCurrent: {}\nNext: {}",
                current, next
            ),
            PendingAction::AddInvoicePrefix { current, with_prefix } => write!(
                f,
                "Invoice number doesn't start with the invoice prefix.\n\nAdd it automatically?\n\nCurrent: {}\nWith prefix: {}",
                current, with_prefix
            ),
            PendingAction::Print => write!(
                f,
                "Ready to print/export PDF?\n\nMake sure the document number, client details and line items are correct."
            ),
        }
    }
}

/// Asks the user to approve an action; may suspend while waiting
#[async_trait(?Send)]
pub trait Confirm {
    async fn confirm(&self, action: &PendingAction) -> bool;
}

/// Hands the current document to the host's print/export facility
pub trait PrintSurface {
    fn print(&self);
}
