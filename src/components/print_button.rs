//! Print Button Component

use leptos::prelude::*;

use crate::context::AppContext;

/// Saves client info, confirms, then opens the print dialog
#[component]
pub fn PrintButton() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let print = move |_| {
        ctx.spawn(|controller| async move {
            controller.print().await?;
            Ok(())
        });
    };

    view! {
        <button class="print-btn no-print" on:click=print>"Print / Export PDF"</button>
    }
}
