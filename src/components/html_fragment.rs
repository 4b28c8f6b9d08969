//! HTML Fragment Component
//!
//! Container filled with static markup fetched from the server.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;

#[component]
pub fn HtmlFragment(
    /// Path relative to the page, e.g. `header.html`
    path: &'static str,
    #[prop(into)] class: String,
) -> impl IntoView {
    let (html, set_html) = signal(String::new());

    spawn_local(async move {
        match browser::fetch_fragment(path).await {
            Ok(markup) => set_html.set(markup),
            // The page still works without its letterhead or banking block
            Err(e) => log::error!("[ui] error loading {}: {}", path, e),
        }
    });

    view! { <div class=class inner_html=move || html.get()></div> }
}
