//! Shopping List App
//!
//! Wires the initial load and the intent pipeline to the reactive store.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use shopping_core::{
    intent_streams, load_purchases, AppConfig, InMemoryDb, ListStore, LoadSource,
    MutationPipeline, Outcome,
};

use crate::api::MockHttpClient;
use crate::components::{ErrorBanner, ItemDialog, ShoppingList};
use crate::context::AppContext;
use crate::dialog::DialogHost;
use crate::page;
use crate::store::{store_apply_snapshot, store_set_error, AppState, AppStateStoreFields, LoadState};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let dialog = DialogHost::new();
    let (intents, streams) = intent_streams();
    provide_context(AppContext::new(intents, dialog));

    let list = ListStore::new();
    let pipeline = MutationPipeline::new(list.clone(), dialog);

    // Initial read, skipped when the page already carries the list
    spawn_local(async move {
        let mut transfer = page::load_transfer_state();
        let http = MockHttpClient::new(InMemoryDb::seed(), &config);
        match load_purchases(&mut transfer, &http, &config).await {
            Ok(loaded) => {
                if loaded.source == LoadSource::TransferState {
                    web_sys::console::log_1(&"[APP] Reusing purchases from transfer state".into());
                }
                let snapshot = list.reset(loaded.records);
                store_apply_snapshot(&store, &snapshot);
                store.load_state().set(LoadState::Ready);
            }
            Err(e) => {
                log::warn!("initial load failed: {}", e);
                store.load_state().set(LoadState::Failed(e.to_string()));
            }
        }
    });

    // Runs until the intent senders are dropped with the app
    spawn_local(async move {
        streams
            .drive(&pipeline, move |kind, result| match result {
                Ok(Outcome::Applied(snapshot)) => store_apply_snapshot(&store, &snapshot),
                Ok(Outcome::Discarded) => {}
                Err(e) => store_set_error(&store, format!("Could not {}: {}", kind, e)),
            })
            .await;
    });

    view! {
        <main class="app-layout">
            <section class="card">
                <h1>"Shopping list"</h1>
                <ErrorBanner />
                <ShoppingList />
            </section>
            <ItemDialog />
        </main>
    }
}
