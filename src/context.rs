//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use quote_core::{DeferredWrite, DocumentController, DocumentError, DocumentResult, DocumentSnapshot};

use crate::browser;

/// Controller handle plus the last rendered snapshot
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Not `Send`; lives in the local arena
    controller: StoredValue<DocumentController, LocalStorage>,
    /// What the view renders - read
    pub snapshot: ReadSignal<DocumentSnapshot>,
    /// What the view renders - write
    set_snapshot: WriteSignal<DocumentSnapshot>,
    /// Bumped when the number field should take focus
    pub focus_number: ReadSignal<u32>,
    set_focus_number: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(controller: DocumentController) -> Self {
        let (snapshot, set_snapshot) = signal(controller.snapshot());
        let (focus_number, set_focus_number) = signal(0u32);
        Self {
            controller: StoredValue::new_local(controller),
            snapshot,
            set_snapshot,
            focus_number,
            set_focus_number,
        }
    }

    pub fn controller(&self) -> DocumentController {
        self.controller.get_value()
    }

    /// Re-read controller state into the view
    pub fn refresh(&self) {
        self.set_snapshot.set(self.controller().snapshot());
    }

    /// Run a synchronous operation, refresh, and surface any error
    pub fn apply(&self, op: impl FnOnce(&DocumentController) -> DocumentResult<()>) {
        let result = op(&self.controller());
        self.refresh();
        if let Err(e) = result {
            self.report(e);
        }
    }

    /// Same as `apply`, for operations that wait on the user
    pub fn spawn<F, Fut>(self, op: F)
    where
        F: FnOnce(DocumentController) -> Fut + 'static,
        Fut: Future<Output = DocumentResult<()>> + 'static,
    {
        let controller = self.controller();
        spawn_local(async move {
            let result = op(controller).await;
            self.refresh();
            if let Err(e) = result {
                self.report(e);
            }
        });
    }

    /// Let a debounced save run in the background
    pub fn defer(&self, write: DeferredWrite) {
        spawn_local(async move {
            if let Err(e) = write.run().await {
                log::warn!("[doc] autosave failed: {}", e);
            }
        });
    }

    pub fn report(&self, err: DocumentError) {
        log::warn!("[doc] {}", err);
        browser::alert(&err.to_string());
        if err == DocumentError::EmptyNumber {
            self.set_focus_number.update(|n| *n += 1);
        }
    }
}
