//! List Store
//!
//! Single owner of the shopping list. All changes go through [`Command`]s;
//! every applied command publishes a new immutable [`Snapshot`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{ListError, ListResult};
use crate::model::{normalize_name, Item, ItemId, PurchaseRecord};

/// A validated-on-apply list mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { name: String },
    Rename { id: ItemId, name: String },
    Remove { id: ItemId },
    Toggle { id: ItemId },
}

/// Immutable view of the list at one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    version: u64,
    items: Arc<[Item]>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            version: 0,
            items: Arc::from(Vec::new()),
        }
    }

    /// Bumped by exactly one per applied command
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Resolve a rendered position to the id of the item shown there
    pub fn id_at(&self, index: usize) -> ListResult<ItemId> {
        self.items
            .get(index)
            .map(|item| item.id)
            .ok_or(ListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    pub fn to_records(&self) -> Vec<PurchaseRecord> {
        self.items.iter().map(Item::to_record).collect()
    }
}

#[derive(Debug)]
struct ListState {
    current: Snapshot,
    next_id: u32,
}

impl ListState {
    fn allocate_id(&mut self) -> ListResult<ItemId> {
        let id = self.next_id.checked_add(1).ok_or(ListError::IdsExhausted)?;
        self.next_id = id;
        Ok(ItemId(id))
    }

    /// Items from wire records; records with a blank name are skipped
    fn build_items(&mut self, records: Vec<PurchaseRecord>) -> Vec<Item> {
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let Some(name) = normalize_name(&record.name) else {
                log::warn!("skipping purchase record with an empty name");
                continue;
            };
            let Ok(id) = self.allocate_id() else {
                log::warn!("no item ids left, dropping remaining purchase records");
                break;
            };
            let mut item = Item::new(id, name);
            item.completed = record.completed;
            items.push(item);
        }
        items
    }

    fn publish(&mut self, items: Vec<Item>) -> Snapshot {
        self.current = Snapshot {
            version: self.current.version + 1,
            items: items.into(),
        };
        self.current.clone()
    }
}

/// Shared handle to the list. Cloning shares the same list.
#[derive(Debug, Clone)]
pub struct ListStore {
    inner: Arc<Mutex<ListState>>,
}

impl Default for ListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ListStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ListState {
                current: Snapshot::empty(),
                next_id: 0,
            })),
        }
    }

    /// Store holding `records` at version 0
    pub fn seeded(records: Vec<PurchaseRecord>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            let items = state.build_items(records);
            state.current.items = items.into();
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        // A panic mid-apply never leaves a half-built snapshot behind
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().current.clone()
    }

    /// Replace the whole list, e.g. once the initial read completes
    pub fn reset(&self, records: Vec<PurchaseRecord>) -> Snapshot {
        let mut state = self.lock();
        let items = state.build_items(records);
        state.publish(items)
    }

    pub fn id_at(&self, index: usize) -> ListResult<ItemId> {
        self.lock().current.id_at(index)
    }

    pub fn apply(&self, command: Command) -> ListResult<Snapshot> {
        let mut state = self.lock();
        let mut items = state.current.items.to_vec();

        match command {
            Command::Add { name } => {
                let name = normalize_name(&name).ok_or(ListError::EmptyName)?;
                let id = state.allocate_id()?;
                items.push(Item::new(id, name));
            }
            Command::Rename { id, name } => {
                let name = normalize_name(&name).ok_or(ListError::EmptyName)?;
                let item = find_mut(&mut items, id)?;
                item.name = name;
            }
            Command::Remove { id } => {
                let position = items
                    .iter()
                    .position(|item| item.id == id)
                    .ok_or(ListError::NotFound(id))?;
                items.remove(position);
            }
            Command::Toggle { id } => {
                let item = find_mut(&mut items, id)?;
                item.completed = !item.completed;
            }
        }

        Ok(state.publish(items))
    }
}

fn find_mut(items: &mut [Item], id: ItemId) -> ListResult<&mut Item> {
    items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or(ListError::NotFound(id))
}
