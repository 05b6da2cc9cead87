//! Shopping List Core
//!
//! Layered the same way the UI consumes it:
//! - model / error / config: plain data
//! - store: the list and its command API
//! - dialog + pipeline: user intents turned into commands
//! - transfer + fetch + backend: the one-shot initial read

pub mod backend;
pub mod config;
pub mod dialog;
pub mod error;
pub mod fetch;
pub mod model;
pub mod pipeline;
pub mod store;
pub mod transfer;

pub use backend::{HttpRequest, InMemoryBackend, InMemoryDb, Method};
pub use config::AppConfig;
pub use dialog::{DialogPresenter, DialogResult, DialogSeed};
pub use error::{ConfigError, FetchError, ListError, ListResult};
pub use fetch::{load_purchases, HttpBackend, HttpResponse, LoadSource, Loaded, PURCHASES};
pub use model::{Item, ItemId, PurchaseRecord};
pub use pipeline::{intent_streams, Intent, IntentKind, IntentSender, IntentStreams, MutationPipeline, Outcome};
pub use store::{Command, ListStore, Snapshot};
pub use transfer::{make_state_key, StateKey, TransferState};
