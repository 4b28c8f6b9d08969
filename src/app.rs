//! Quote Desk Frontend App
//!
//! Builds the document controller over browser capabilities and lays out
//! the printable page.

use std::rc::Rc;

use leptos::prelude::*;
use quote_core::{Capabilities, ControllerConfig, DocumentController, KeyValueStore, MemoryStore};

use crate::browser::{self, DialogConfirm, GlooTimer, LocalStore, WindowPrint};
use crate::components::{
    ClientInfoForm, DocumentHeader, HtmlFragment, LineItemTable, PrintButton, TotalsPanel,
};
use crate::context::AppContext;

/// Restore the document from local storage
///
/// Falls back to an in-memory store so the page stays usable when
/// storage is disabled.
fn load_controller() -> DocumentController {
    let store: Rc<dyn KeyValueStore> = match LocalStore::open() {
        Ok(store) => Rc::new(store),
        Err(e) => {
            log::warn!("[doc] {}; changes will not be kept", e);
            Rc::new(MemoryStore::new())
        }
    };
    let caps = Capabilities {
        confirm: Rc::new(DialogConfirm),
        timer: Rc::new(GlooTimer),
        printer: Rc::new(WindowPrint),
    };
    DocumentController::load(ControllerConfig::default(), store, caps, browser::today())
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(load_controller());
    provide_context(ctx);

    browser::guard_unload(move || ctx.snapshot.with_untracked(|s| !s.rows.is_empty()));

    let display_when = |visible: bool| if visible { "block" } else { "none" };

    view! {
        <main class="document">
            <HtmlFragment path=browser::HEADER_FRAGMENT class="header-container" />

            <DocumentHeader />
            <ClientInfoForm />
            <LineItemTable />
            <TotalsPanel />

            // Kept mounted so the fragment is fetched once
            <div
                class="banking-container"
                style:display=move || display_when(ctx.snapshot.with(|s| s.shows_banking))
            >
                <HtmlFragment path=browser::BANKING_FRAGMENT class="banking-section" />
            </div>

            <Show when=move || ctx.snapshot.with(|s| s.shows_acceptance)>
                <section class="quote-acceptance">
                    <h3>"Acceptance"</h3>
                    <p>"I accept this quotation and its terms."</p>
                    <div class="signature-line">"Signature: ____________________"</div>
                    <div class="signature-line">"Date: ____________________"</div>
                </section>
            </Show>

            <PrintButton />
        </main>
    }
}
