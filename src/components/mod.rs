//! UI Components
//!
//! Leptos components for the document page.

mod client_info_form;
mod document_header;
mod html_fragment;
mod line_item_table;
mod print_button;
mod totals_panel;

pub use client_info_form::ClientInfoForm;
pub use document_header::DocumentHeader;
pub use html_fragment::HtmlFragment;
pub use line_item_table::LineItemTable;
pub use print_button::PrintButton;
pub use totals_panel::TotalsPanel;
