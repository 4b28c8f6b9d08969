//! HTML Fragments
//!
//! Static markup (letterhead, banking details) fetched at startup.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::describe;

pub const HEADER_FRAGMENT: &str = "header.html";
pub const BANKING_FRAGMENT: &str = "banking.html";

pub async fn fetch_fragment(path: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| describe(&e))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| format!("{} did not return a response", path))?;
    if !response.ok() {
        return Err(format!("failed to load {}: HTTP {}", path, response.status()));
    }

    let text = response.text().map_err(|e| describe(&e))?;
    let text = JsFuture::from(text).await.map_err(|e| describe(&e))?;
    text.as_string().ok_or_else(|| format!("{} body is not text", path))
}
