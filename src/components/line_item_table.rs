//! Line Item Table Component
//!
//! Editable rows with per-row totals and delete.

use leptos::prelude::*;
use quote_core::{LineField, RowView};

use crate::context::AppContext;

#[component]
pub fn LineItemTable() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let add_item = move |_| {
        ctx.controller().add_item();
        ctx.refresh();
    };

    view! {
        <section class="line-items">
            <table class="item-table">
                <thead>
                    <tr>
                        <th>"Item"</th>
                        <th>"Description"</th>
                        <th>"Qty"</th>
                        <th>"Rate"</th>
                        <th>"Total"</th>
                        <th class="no-print"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || ctx.snapshot.with(|s| s.rows.iter().map(|row| row.item.id).collect::<Vec<_>>())
                        key=|id| *id
                        children=move |id| view! { <LineItemRow id=id /> }
                    />
                </tbody>
            </table>
            <button class="add-item-btn no-print" on:click=add_item>"+ Add Item"</button>
        </section>
    }
}

/// One table row, looked up by id on every snapshot
#[component]
fn LineItemRow(id: u32) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let row = move || ctx.snapshot.with(|s| s.rows.iter().find(|row| row.item.id == id).cloned());
    let text = move |read: fn(&RowView) -> String| move || row().map(|r| read(&r)).unwrap_or_default();

    let edit = move |field: LineField, value: String| {
        ctx.apply(|controller| controller.edit_item(id, field, value));
    };

    let delete = move |_| {
        ctx.spawn(move |controller| async move {
            controller.delete_item(id).await?;
            Ok(())
        });
    };

    view! {
        <tr class="item-row">
            <td>
                <input
                    type="text"
                    prop:value=text(|r| r.item.label.clone())
                    on:input=move |ev| edit(LineField::Label, event_target_value(&ev))
                />
            </td>
            <td>
                <input
                    type="text"
                    prop:value=text(|r| r.item.description.clone())
                    on:input=move |ev| edit(LineField::Description, event_target_value(&ev))
                />
            </td>
            <td>
                <input
                    type="text"
                    class="quantity"
                    prop:value=text(|r| r.item.quantity.clone())
                    on:input=move |ev| edit(LineField::Quantity, event_target_value(&ev))
                />
            </td>
            <td>
                // Normalized on commit so typing is not rewritten mid-entry
                <input
                    type="text"
                    class="rate"
                    prop:value=text(|r| r.item.rate.clone())
                    on:change=move |ev| edit(LineField::Rate, event_target_value(&ev))
                />
            </td>
            <td class="line-total">{text(|r| r.line_total.clone())}</td>
            <td class="no-print">
                <button class="delete-btn" title="Delete item" on:click=delete>"×"</button>
            </td>
        </tr>
    }
}
