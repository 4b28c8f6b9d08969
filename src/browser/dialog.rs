//! Dialogs
//!
//! Blocking `window.confirm` / `window.alert` prompts.

use async_trait::async_trait;
use quote_core::{Confirm, PendingAction};

/// Confirmation through the native dialog
pub struct DialogConfirm;

#[async_trait(?Send)]
impl Confirm for DialogConfirm {
    async fn confirm(&self, action: &PendingAction) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(&action.to_string()).ok())
            .unwrap_or(false)
    }
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
