//! Totals Panel Component
//!
//! Read-only money summary under the item table.

use leptos::prelude::*;

use crate::context::AppContext;

/// Subtotal, VAT and grand total
#[component]
pub fn TotalsPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let symbol = move || ctx.snapshot.with(|s| s.currency_symbol.clone());
    let vat_percent = move || (ctx.controller().config().vat_rate * 100.0).round();

    view! {
        <section class="totals">
            <div class="totals-row">
                <span>"Subtotal"</span>
                <span>{symbol} " " {move || ctx.snapshot.with(|s| s.subtotal.clone())}</span>
            </div>
            <div class="totals-row">
                <span>"VAT (" {vat_percent} "%)"</span>
                <span>{symbol} " " {move || ctx.snapshot.with(|s| s.vat.clone())}</span>
            </div>
            <div class="totals-row grand-total">
                <span>"Total"</span>
                <span>{symbol} " " {move || ctx.snapshot.with(|s| s.grand_total.clone())}</span>
            </div>
        </section>
    }
}
