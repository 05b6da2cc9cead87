//! Item Dialog Component
//!
//! Modal asking for an item name. Rendered while the dialog host has a
//! pending request; OK confirms, Cancel and Escape dismiss.

use leptos::html;
use leptos::prelude::*;
use shopping_core::DialogResult;

use crate::context::use_app_context;
use crate::dialog::{DialogHost, PendingDialog};

#[component]
pub fn ItemDialog() -> impl IntoView {
    let ctx = use_app_context();
    let host = ctx.dialog;

    move || host.current().map(|pending| view! { <DialogBody host=host pending=pending /> })
}

#[component]
fn DialogBody(host: DialogHost, pending: PendingDialog) -> impl IntoView {
    let seed = pending.seed.clone();
    let is_edit = seed.id.is_some();
    let (name, set_name) = signal(seed.name.clone());
    let input_ref = NodeRef::<html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    });

    let confirm_seed = seed.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        host.close(Some(DialogResult::confirmed(&confirm_seed, name.get_untracked())));
    };

    let cancel_seed = seed.clone();
    let on_cancel = move |_: leptos::ev::MouseEvent| {
        host.close(Some(DialogResult::dismissed(&cancel_seed, name.get_untracked())));
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            host.close(None);
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| host.close(None)>
            <form
                class="dialog"
                on:submit=on_submit
                on:keydown=on_keydown
                on:click=|ev| ev.stop_propagation()
            >
                <h2>{if is_edit { "Edit item" } else { "New item" }}</h2>
                <input
                    type="text"
                    placeholder="Name"
                    node_ref=input_ref
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <div class="dialog-actions">
                    <button type="button" on:click=on_cancel>"Cancel"</button>
                    <button
                        type="submit"
                        class="primary"
                        disabled=move || name.get().trim().is_empty()
                    >
                        "OK"
                    </button>
                </div>
            </form>
        </div>
    }
}
