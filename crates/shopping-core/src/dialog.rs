//! Dialog Contract
//!
//! The pipeline asks a [`DialogPresenter`] for a name before adding or
//! renaming. How the dialog is shown is up to the implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{normalize_name, ItemId};

/// Initial dialog content
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialogSeed {
    pub name: String,
    /// Present when editing an existing item
    pub id: Option<ItemId>,
}

impl DialogSeed {
    pub fn for_add() -> Self {
        Self::default()
    }

    pub fn for_edit(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Some(id),
        }
    }
}

/// What the user left in the dialog when it closed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogResult {
    pub name: String,
    pub id: Option<ItemId>,
    /// `false` when closed without confirming
    pub choose: bool,
}

impl DialogResult {
    pub fn confirmed(seed: &DialogSeed, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: seed.id,
            choose: true,
        }
    }

    pub fn dismissed(seed: &DialogSeed, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: seed.id,
            choose: false,
        }
    }

    /// Trimmed name if the dialog was confirmed with a non-blank name
    pub fn accepted_name(&self) -> Option<String> {
        if !self.choose {
            return None;
        }
        normalize_name(&self.name)
    }
}

/// Presents a modal and resolves once it closes. `None` means cancelled.
#[async_trait(?Send)]
pub trait DialogPresenter {
    async fn present(&self, seed: DialogSeed) -> Option<DialogResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_name() {
        let seed = DialogSeed::for_edit(ItemId(3), "Bread");
        assert_eq!(
            DialogResult::confirmed(&seed, " Bread2 ").accepted_name(),
            Some("Bread2".to_string())
        );
        assert_eq!(DialogResult::confirmed(&seed, "  ").accepted_name(), None);
        assert_eq!(DialogResult::dismissed(&seed, "Bread2").accepted_name(), None);
    }

    #[test]
    fn test_result_keeps_seed_id() {
        let seed = DialogSeed::for_edit(ItemId(3), "Bread");
        assert_eq!(DialogResult::confirmed(&seed, "x").id, Some(ItemId(3)));
        assert_eq!(DialogResult::confirmed(&DialogSeed::for_add(), "x").id, None);
    }
}
