//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The list itself
//! is owned by `shopping_core::ListStore`; this store mirrors its latest
//! snapshot for rendering.

use leptos::prelude::*;
use reactive_stores::Store;
use shopping_core::{Item, Snapshot};

/// Progress of the initial purchases read
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Items of the latest snapshot, in list order
    pub items: Vec<Item>,
    /// Version of the mirrored snapshot
    pub version: u64,
    /// How many of `items` are completed
    pub completed: usize,
    pub load_state: LoadState,
    /// Last rejected operation, shown until dismissed
    pub last_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Mirror a list snapshot, ignoring ones older than what is shown
pub fn store_apply_snapshot(store: &AppStore, snapshot: &Snapshot) {
    if snapshot.version() < store.version().get_untracked() {
        return;
    }
    store.version().set(snapshot.version());
    store.completed().set(snapshot.completed_count());
    store.items().set(snapshot.items().to_vec());
}

pub fn store_set_error(store: &AppStore, message: String) {
    store.last_error().set(Some(message));
}

pub fn store_clear_error(store: &AppStore) {
    store.last_error().set(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopping_core::{Command, ListStore, PurchaseRecord};

    #[test]
    fn test_stale_snapshot_is_ignored() {
        let owner = Owner::new();
        owner.set();

        let store = Store::new(AppState::default());
        let list = ListStore::seeded(vec![PurchaseRecord::new("Bread", false)]);
        let bread = list.id_at(0).unwrap();

        let seeded = list.snapshot();
        let toggled = list.apply(Command::Toggle { id: bread }).unwrap();

        store_apply_snapshot(&store, &toggled);
        store_apply_snapshot(&store, &seeded);

        assert_eq!(store.version().get_untracked(), 1);
        assert_eq!(store.completed().get_untracked(), 1);
        assert!(store.items().get_untracked()[0].completed);
    }

    #[test]
    fn test_error_set_and_clear() {
        let owner = Owner::new();
        owner.set();

        let store = Store::new(AppState::default());
        store_set_error(&store, "Could not delete".to_string());
        assert_eq!(store.last_error().get_untracked().as_deref(), Some("Could not delete"));
        store_clear_error(&store);
        assert_eq!(store.last_error().get_untracked(), None);
    }
}
