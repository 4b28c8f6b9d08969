//! Browser Adapters
//!
//! Platform implementations of the controller's storage and host
//! capabilities, plus page-level helpers, organized by concern.

mod dialog;
mod fragment;
mod storage;
mod timer;
mod window;
mod worker;

pub use dialog::*;
pub use fragment::*;
pub use storage::*;
pub use timer::*;
pub use window::*;
pub use worker::*;

use wasm_bindgen::JsValue;

/// Render a rejected JS value for logs and error messages
fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
