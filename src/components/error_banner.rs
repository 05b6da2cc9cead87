//! Error Banner Component
//!
//! Shows the last rejected operation until dismissed.

use leptos::prelude::*;

use crate::store::{store_clear_error, use_app_store, AppStateStoreFields};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let store = use_app_store();

    move || {
        store.last_error().get().map(|message| {
            view! {
                <div class="error-banner" role="alert">
                    <span>{message}</span>
                    <button class="dismiss-btn" on:click=move |_| store_clear_error(&store)>"×"</button>
                </div>
            }
        })
    }
}
