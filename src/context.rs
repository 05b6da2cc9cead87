//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use shopping_core::{IntentSender, ItemId};

use crate::dialog::DialogHost;

/// App-wide handles provided via context
#[derive(Clone)]
pub struct AppContext {
    intents: IntentSender,
    pub dialog: DialogHost,
}

impl AppContext {
    pub fn new(intents: IntentSender, dialog: DialogHost) -> Self {
        Self { intents, dialog }
    }

    pub fn add(&self) {
        report_closed("add", self.intents.add());
    }

    pub fn edit(&self, id: ItemId, name: String) {
        report_closed("update", self.intents.update(id, name));
    }

    pub fn delete(&self, id: ItemId) {
        report_closed("delete", self.intents.delete(id));
    }

    pub fn toggle(&self, id: ItemId) {
        report_closed("toggle", self.intents.toggle(id));
    }
}

fn report_closed(kind: &str, result: shopping_core::ListResult<()>) {
    if let Err(e) = result {
        log::error!("{} intent dropped: {}", kind, e);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
