//! Document Header Component
//!
//! Title, type selector, number field with increment, and the invoice
//! reference.

use leptos::prelude::*;
use quote_core::DocumentType;

use crate::browser;
use crate::context::AppContext;

const DOCUMENT_TYPES: &[(DocumentType, &str)] = &[
    (DocumentType::Quote, "Quote"),
    (DocumentType::Invoice, "Invoice"),
];

#[component]
pub fn DocumentHeader() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let number_ref = NodeRef::<leptos::html::Input>::new();

    // Focus requests come from failed increments on a blank number
    Effect::new(move |_| {
        if ctx.focus_number.get() == 0 {
            return;
        }
        if let Some(input) = number_ref.get() {
            let _ = input.focus();
        }
    });

    let on_type_change = move |ev: web_sys::Event| {
        let Some(to) = DocumentType::parse(&event_target_value(&ev)) else {
            return;
        };
        ctx.apply(|controller| controller.switch_type(to));
    };

    let on_number_change = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        ctx.spawn(move |controller| async move {
            let write = controller.edit_number(text).await?;
            ctx.defer(write);
            Ok(())
        });
    };

    let increment = move |_| {
        ctx.spawn(move |controller| async move {
            if let Some(next) = controller.increment_number().await? {
                ctx.refresh();
                browser::alert(&format!("Document number updated to: {}", next));
            }
            Ok(())
        });
    };

    let title_class = move || match ctx.snapshot.with(|s| s.title_class) {
        Some(class) => format!("document-title {}", class),
        None => "document-title".to_string(),
    };

    view! {
        <section class="document-header">
            <h1 class=title_class>{move || ctx.snapshot.with(|s| s.title)}</h1>

            <div class="document-meta">
                <label class="no-print">
                    "Document type "
                    <select on:change=on_type_change>
                        {DOCUMENT_TYPES.iter().map(|&(doc_type, label)| {
                            let is_selected = move || ctx.snapshot.with(|s| s.doc_type == doc_type);
                            view! {
                                <option value=doc_type.as_str() prop:selected=is_selected>{label}</option>
                            }
                        }).collect_view()}
                    </select>
                </label>

                <div class="document-number-row">
                    <span class="document-type-label">
                        {move || ctx.snapshot.with(|s| s.doc_type.as_str().to_uppercase())}
                        " #"
                    </span>
                    <input
                        type="text"
                        class="document-number"
                        node_ref=number_ref
                        prop:value=move || ctx.snapshot.with(|s| s.number.clone())
                        on:change=on_number_change
                    />
                    <button class="increment-btn no-print" title="Next number" on:click=increment>
                        "+1"
                    </button>
                </div>

                <div class="document-date">
                    "Date: " {move || ctx.snapshot.with(|s| s.issued_on.clone())}
                </div>

                <Show when=move || ctx.snapshot.with(|s| s.doc_type == DocumentType::Invoice)>
                    <div class="invoice-reference">
                        "Reference: "
                        <span>{move || ctx.snapshot.with(|s| s.invoice_reference.clone())}</span>
                    </div>
                </Show>
            </div>
        </section>
    }
}
