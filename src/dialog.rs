//! Dialog Host
//!
//! Implements the core dialog contract on top of a signal: presenting sets
//! the pending dialog, the `ItemDialog` component renders it and answers
//! through a oneshot channel.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::channel::oneshot;
use leptos::prelude::*;
use shopping_core::{DialogPresenter, DialogResult, DialogSeed};

type Responder = oneshot::Sender<Option<DialogResult>>;

/// A dialog waiting for the user
#[derive(Clone)]
pub struct PendingDialog {
    pub seed: DialogSeed,
    responder: Arc<Mutex<Option<Responder>>>,
}

impl PendingDialog {
    /// Answer once; later answers are ignored
    fn respond(&self, result: Option<DialogResult>) {
        let responder = self.responder.lock().ok().and_then(|mut slot| slot.take());
        if let Some(tx) = responder {
            let _ = tx.send(result);
        }
    }
}

#[derive(Clone, Copy)]
pub struct DialogHost {
    open: RwSignal<Option<PendingDialog>>,
}

impl DialogHost {
    pub fn new() -> Self {
        Self {
            open: RwSignal::new(None),
        }
    }

    /// Currently open dialog (tracked)
    pub fn current(&self) -> Option<PendingDialog> {
        self.open.get()
    }

    /// Close the open dialog. `None` means dismissed without an answer.
    pub fn close(&self, result: Option<DialogResult>) {
        if let Some(pending) = self.open.get_untracked() {
            pending.respond(result);
        }
        self.open.set(None);
    }
}

#[async_trait(?Send)]
impl DialogPresenter for DialogHost {
    async fn present(&self, seed: DialogSeed) -> Option<DialogResult> {
        // Only one modal at a time: whatever was open counts as cancelled
        if let Some(previous) = self.open.get_untracked() {
            previous.respond(None);
        }

        let (tx, rx) = oneshot::channel();
        self.open.set(Some(PendingDialog {
            seed,
            responder: Arc::new(Mutex::new(Some(tx))),
        }));

        rx.await.ok().flatten()
    }
}
