//! Client Info Form Component
//!
//! Name and address; autosaves while typing and saves on change.

use leptos::prelude::*;
use quote_core::ClientInfo;

use crate::context::AppContext;

#[component]
pub fn ClientInfoForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let update = move |edit: fn(&mut ClientInfo, String), value: String| {
        let controller = ctx.controller();
        let mut info = controller.client_info();
        edit(&mut info, value);
        ctx.defer(controller.client_input(info));
        ctx.refresh();
    };

    let commit = move |_: web_sys::Event| {
        ctx.apply(|controller| controller.commit_client_info());
    };

    view! {
        <section class="client-info">
            <h3>"Bill To"</h3>
            <input
                type="text"
                class="client-name"
                placeholder="Client name"
                prop:value=move || ctx.snapshot.with(|s| s.client.name.clone())
                on:input=move |ev| update(|info, v| info.name = v, event_target_value(&ev))
                on:change=commit
            />
            <textarea
                class="client-address"
                placeholder="Client address"
                prop:value=move || ctx.snapshot.with(|s| s.client.address.clone())
                on:input=move |ev| update(|info, v| info.address = v, event_target_value(&ev))
                on:change=commit
            ></textarea>
        </section>
    }
}
