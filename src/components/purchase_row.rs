//! Purchase Row Component
//!
//! One list entry with its checkbox, edit and delete actions.

use leptos::prelude::*;
use shopping_core::Item;

use crate::context::use_app_context;

#[component]
pub fn PurchaseRow(item: Item) -> impl IntoView {
    let ctx = use_app_context();

    let id = item.id;
    let completed = item.completed;
    let name = item.name.clone();

    let on_toggle = {
        let ctx = ctx.clone();
        move |_: leptos::ev::Event| ctx.toggle(id)
    };
    let on_edit = {
        let ctx = ctx.clone();
        let name = name.clone();
        move |_: leptos::ev::MouseEvent| ctx.edit(id, name.clone())
    };
    let on_delete = move |_: leptos::ev::MouseEvent| ctx.delete(id);

    view! {
        <li class=if completed { "purchase-row completed" } else { "purchase-row" }>
            <input type="checkbox" checked=completed on:change=on_toggle />
            <span class="purchase-name">{name}</span>
            <button class="edit-btn" title="Edit" on:click=on_edit>"✎"</button>
            <button class="delete-btn" title="Delete" on:click=on_delete>"×"</button>
        </li>
    }
}
