//! Window Helpers
//!
//! Print, local date and the leave-page guard.

use chrono::NaiveDate;
use leptos::prelude::*;
use quote_core::PrintSurface;

use super::describe;

/// Opens the browser print dialog (print to PDF included)
pub struct WindowPrint;

impl PrintSurface for WindowPrint {
    fn print(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.print() {
            log::warn!("[doc] print failed: {}", describe(&e));
        }
    }
}

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

/// Ask before leaving while `has_rows` reports unsaved table rows
pub fn guard_unload(has_rows: impl Fn() -> bool + 'static) {
    // Lives as long as the page; never removed
    let _ = window_event_listener(leptos::ev::beforeunload, move |ev| {
        if has_rows() {
            ev.prevent_default();
            ev.set_return_value("You have unsaved changes. Are you sure you want to leave?");
        }
    });
}
