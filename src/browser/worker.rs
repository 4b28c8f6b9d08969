//! Service Worker Registration

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::ServiceWorkerRegistration;

use super::describe;

pub const SERVICE_WORKER_SCRIPT: &str = "sw.js";

/// Register the offline worker; failures only disable offline support
pub async fn register_service_worker(script: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let container = window.navigator().service_worker();
    match JsFuture::from(container.register(script)).await {
        Ok(registration) => {
            let registration: ServiceWorkerRegistration = registration.unchecked_into();
            log::info!("[sw] registered with scope {}", registration.scope());
        }
        Err(e) => log::warn!("[sw] registration failed: {}", describe(&e)),
    }
}
