//! Quote Desk Frontend Entry Point

mod app;
mod browser;
mod components;
mod context;

use app::App;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn main() {
    console_error_panic_hook::set_once();
    console_logger::init_or_ignore(log::Level::Info);

    mount_to_body(App);
    spawn_local(browser::register_service_worker(browser::SERVICE_WORKER_SCRIPT));
}
