//! Shopping List Component
//!
//! Renders the list card body according to the load state.

use leptos::prelude::*;

use crate::components::PurchaseRow;
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields, LoadState};

#[component]
pub fn ShoppingList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let is_ready = move || store.load_state().get() == LoadState::Ready;
    let summary = move || {
        format!("{} of {} bought", store.completed().get(), store.items().with(|items| items.len()))
    };

    view! {
        <div class="shopping-list">
            {move || match store.load_state().get() {
                LoadState::Loading => view! { <p class="list-status">"Loading purchases..."</p> }.into_any(),
                LoadState::Failed(message) => view! {
                    <p class="list-status error">"Could not load purchases: " {message}</p>
                }.into_any(),
                LoadState::Ready => view! {
                    <Show
                        when=move || !store.items().get().is_empty()
                        fallback=|| view! { <p class="list-status">"Nothing to buy."</p> }
                    >
                        <ul class="purchase-list">
                            <For
                                each=move || store.items().get()
                                key=|item| (item.id, item.name.clone(), item.completed)
                                children=move |item| view! { <PurchaseRow item=item /> }
                            />
                        </ul>
                    </Show>
                }.into_any(),
            }}

            <div class="list-footer">
                <span class="item-count">{summary}</span>
                <button
                    class="add-btn"
                    disabled=move || !is_ready()
                    on:click=move |_| ctx.add()
                >
                    "Add"
                </button>
            </div>
        </div>
    }
}
