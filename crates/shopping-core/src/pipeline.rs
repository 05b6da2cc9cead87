//! Mutation Pipeline
//!
//! Turns user intents into store commands. Add and update wait on the
//! dialog first; delete and toggle apply immediately. Four independent
//! intent streams feed the pipeline, one per intent kind.

use std::fmt;

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;

use crate::dialog::{DialogPresenter, DialogSeed};
use crate::error::{ListError, ListResult};
use crate::model::ItemId;
use crate::store::{Command, ListStore, Snapshot};

/// A user action on the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add,
    /// Edit `id`, pre-filling the dialog with `name`
    Update { id: ItemId, name: String },
    Delete { id: ItemId },
    Toggle { id: ItemId },
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Add => IntentKind::Add,
            Intent::Update { .. } => IntentKind::Update,
            Intent::Delete { .. } => IntentKind::Delete,
            Intent::Toggle { .. } => IntentKind::Toggle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    Add,
    Update,
    Delete,
    Toggle,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Add => "add",
            IntentKind::Update => "update",
            IntentKind::Delete => "delete",
            IntentKind::Toggle => "toggle",
        }
    }

    fn applied_message(&self) -> &'static str {
        match self {
            IntentKind::Add => "added",
            IntentKind::Update => "updated",
            IntentKind::Delete => "deleted",
            IntentKind::Toggle => "toggled the status",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handling one intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(Snapshot),
    /// Dialog cancelled, not confirmed, or left blank
    Discarded,
}

impl Outcome {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Outcome::Applied(snapshot) => Some(snapshot),
            Outcome::Discarded => None,
        }
    }
}

pub struct MutationPipeline<D> {
    store: ListStore,
    dialog: D,
}

impl<D: DialogPresenter> MutationPipeline<D> {
    pub fn new(store: ListStore, dialog: D) -> Self {
        Self { store, dialog }
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    /// Handle one intent. Failures are logged and leave the list untouched.
    pub async fn handle(&self, intent: Intent) -> ListResult<Outcome> {
        let kind = intent.kind();
        let result = self.route(intent).await;
        match &result {
            Ok(Outcome::Applied(snapshot)) => {
                log::info!("{} (version {})", kind.applied_message(), snapshot.version());
            }
            Ok(Outcome::Discarded) => log::debug!("{} dialog closed without a name", kind),
            Err(e) => log::warn!("{} rejected: {}", kind, e),
        }
        result
    }

    async fn route(&self, intent: Intent) -> ListResult<Outcome> {
        match intent {
            Intent::Add => match self.ask(DialogSeed::for_add()).await {
                Some(name) => self.commit(Command::Add { name }),
                None => Ok(Outcome::Discarded),
            },
            Intent::Update { id, name } => {
                if self.store.snapshot().get(id).is_none() {
                    return Err(ListError::NotFound(id));
                }
                // The item may be deleted while the dialog is open; apply re-checks
                match self.ask(DialogSeed::for_edit(id, name)).await {
                    Some(name) => self.commit(Command::Rename { id, name }),
                    None => Ok(Outcome::Discarded),
                }
            }
            Intent::Delete { id } => self.commit(Command::Remove { id }),
            Intent::Toggle { id } => self.commit(Command::Toggle { id }),
        }
    }

    async fn ask(&self, seed: DialogSeed) -> Option<String> {
        self.dialog
            .present(seed)
            .await
            .and_then(|result| result.accepted_name())
    }

    fn commit(&self, command: Command) -> ListResult<Outcome> {
        self.store.apply(command).map(Outcome::Applied)
    }
}

/// Create the four intent streams
pub fn intent_streams() -> (IntentSender, IntentStreams) {
    let (add_tx, add_rx) = unbounded();
    let (update_tx, update_rx) = unbounded();
    let (delete_tx, delete_rx) = unbounded();
    let (toggle_tx, toggle_rx) = unbounded();
    (
        IntentSender {
            add: add_tx,
            update: update_tx,
            delete: delete_tx,
            toggle: toggle_tx,
        },
        IntentStreams {
            add: add_rx,
            update: update_rx,
            delete: delete_rx,
            toggle: toggle_rx,
        },
    )
}

/// Producer side of the intent streams. Dropping every clone ends
/// [`IntentStreams::drive`].
#[derive(Debug, Clone)]
pub struct IntentSender {
    add: UnboundedSender<Intent>,
    update: UnboundedSender<Intent>,
    delete: UnboundedSender<Intent>,
    toggle: UnboundedSender<Intent>,
}

impl IntentSender {
    pub fn add(&self) -> ListResult<()> {
        self.send(Intent::Add)
    }

    pub fn update(&self, id: ItemId, name: impl Into<String>) -> ListResult<()> {
        self.send(Intent::Update { id, name: name.into() })
    }

    pub fn delete(&self, id: ItemId) -> ListResult<()> {
        self.send(Intent::Delete { id })
    }

    pub fn toggle(&self, id: ItemId) -> ListResult<()> {
        self.send(Intent::Toggle { id })
    }

    pub fn send(&self, intent: Intent) -> ListResult<()> {
        let stream = match intent.kind() {
            IntentKind::Add => &self.add,
            IntentKind::Update => &self.update,
            IntentKind::Delete => &self.delete,
            IntentKind::Toggle => &self.toggle,
        };
        stream
            .unbounded_send(intent)
            .map_err(|_| ListError::StreamClosed)
    }
}

/// Consumer side of the intent streams
#[derive(Debug)]
pub struct IntentStreams {
    add: UnboundedReceiver<Intent>,
    update: UnboundedReceiver<Intent>,
    delete: UnboundedReceiver<Intent>,
    toggle: UnboundedReceiver<Intent>,
}

impl IntentStreams {
    /// Run all four streams until every sender is gone.
    ///
    /// Each stream handles its intents in arrival order. A stream waiting
    /// on a dialog does not hold up the others.
    pub async fn drive<D, F>(self, pipeline: &MutationPipeline<D>, report: F)
    where
        D: DialogPresenter,
        F: Fn(IntentKind, ListResult<Outcome>),
    {
        futures::join!(
            run_stream(self.add, pipeline, &report),
            run_stream(self.update, pipeline, &report),
            run_stream(self.delete, pipeline, &report),
            run_stream(self.toggle, pipeline, &report),
        );
        log::debug!("intent streams closed");
    }
}

async fn run_stream<D, F>(
    mut stream: UnboundedReceiver<Intent>,
    pipeline: &MutationPipeline<D>,
    report: &F,
) where
    D: DialogPresenter,
    F: Fn(IntentKind, ListResult<Outcome>),
{
    while let Some(intent) = stream.next().await {
        let kind = intent.kind();
        report(kind, pipeline.handle(intent).await);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogResult;
    use crate::model::PurchaseRecord;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Answers dialogs from a queue and remembers the seeds it was shown
    #[derive(Default)]
    struct ScriptedDialog {
        answers: RefCell<VecDeque<Option<(String, bool)>>>,
        seen: RefCell<Vec<DialogSeed>>,
    }

    impl ScriptedDialog {
        fn answering(answers: Vec<Option<(&str, bool)>>) -> Self {
            Self {
                answers: RefCell::new(
                    answers
                        .into_iter()
                        .map(|a| a.map(|(name, choose)| (name.to_string(), choose)))
                        .collect(),
                ),
                seen: RefCell::default(),
            }
        }
    }

    #[async_trait(?Send)]
    impl DialogPresenter for ScriptedDialog {
        async fn present(&self, seed: DialogSeed) -> Option<DialogResult> {
            self.seen.borrow_mut().push(seed.clone());
            let (name, choose) = self.answers.borrow_mut().pop_front().flatten()?;
            Some(if choose {
                DialogResult::confirmed(&seed, name)
            } else {
                DialogResult::dismissed(&seed, name)
            })
        }
    }

    fn pipeline(answers: Vec<Option<(&str, bool)>>) -> MutationPipeline<ScriptedDialog> {
        let store = ListStore::seeded(vec![
            PurchaseRecord::new("Bread", false),
            PurchaseRecord::new("Milk", false),
        ]);
        MutationPipeline::new(store, ScriptedDialog::answering(answers))
    }

    #[tokio::test]
    async fn test_add_confirmed() {
        let p = pipeline(vec![Some(("Eggs", true))]);
        let outcome = p.handle(Intent::Add).await.unwrap();
        let snapshot = outcome.snapshot().unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.to_records()[2], PurchaseRecord::new("Eggs", false));
        assert_eq!(p.dialog().seen.borrow()[0], DialogSeed::for_add());
    }

    #[tokio::test]
    async fn test_add_discarded() {
        let p = pipeline(vec![Some(("   ", true)), Some(("Eggs", false)), None]);
        for _ in 0..3 {
            assert_eq!(p.handle(Intent::Add).await, Ok(Outcome::Discarded));
        }
        assert_eq!(p.store().snapshot().len(), 2);
        assert_eq!(p.store().snapshot().version(), 0);
    }

    #[tokio::test]
    async fn test_update_seeds_dialog_and_renames() {
        let p = pipeline(vec![Some(("Bread2", true))]);
        let bread = p.store().id_at(0).unwrap();

        let outcome = p
            .handle(Intent::Update { id: bread, name: "Bread".into() })
            .await
            .unwrap();
        let records = outcome.snapshot().unwrap().to_records();
        assert_eq!(records[0], PurchaseRecord::new("Bread2", false));
        assert_eq!(records[1], PurchaseRecord::new("Milk", false));
        assert_eq!(p.dialog().seen.borrow()[0], DialogSeed::for_edit(bread, "Bread"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_skips_dialog() {
        let p = pipeline(vec![Some(("x", true))]);
        let result = p.handle(Intent::Update { id: ItemId(42), name: "x".into() }).await;
        assert_eq!(result, Err(ListError::NotFound(ItemId(42))));
        assert!(p.dialog().seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_toggle_skip_dialog() {
        let p = pipeline(vec![]);
        let bread = p.store().id_at(0).unwrap();
        let milk = p.store().id_at(1).unwrap();

        p.handle(Intent::Toggle { id: bread }).await.unwrap();
        let outcome = p.handle(Intent::Delete { id: milk }).await.unwrap();
        let snapshot = outcome.snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.items()[0].completed);
        assert!(p.dialog().seen.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_drive_reports_every_intent() {
        let p = pipeline(vec![Some(("Eggs", true))]);
        let (sender, streams) = intent_streams();
        let bread = p.store().id_at(0).unwrap();

        sender.add().unwrap();
        sender.toggle(bread).unwrap();
        sender.delete(ItemId(99)).unwrap();
        drop(sender);

        let reports = RefCell::new(Vec::new());
        streams
            .drive(&p, |kind, result| reports.borrow_mut().push((kind, result.is_ok())))
            .await;

        let mut reports = reports.into_inner();
        reports.sort_by_key(|(kind, _)| kind.as_str());
        assert_eq!(
            reports,
            vec![
                (IntentKind::Add, true),
                (IntentKind::Delete, false),
                (IntentKind::Toggle, true),
            ]
        );
        assert_eq!(p.store().snapshot().len(), 3);
    }

    #[test]
    fn test_send_after_streams_dropped() {
        let (sender, streams) = intent_streams();
        drop(streams);
        assert_eq!(sender.add(), Err(ListError::StreamClosed));
    }
}
