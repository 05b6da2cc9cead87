//! Domain Model
//!
//! Purchase items as seen on the wire and inside the list store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an item within one page load.
///
/// Allocated by the store, never reused after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Purchase as served by `GET api/purchases`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub name: String,
    pub completed: bool,
}

impl PurchaseRecord {
    pub fn new(name: impl Into<String>, completed: bool) -> Self {
        Self {
            name: name.into(),
            completed,
        }
    }
}

/// A shopping list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Always trimmed and non-empty
    pub name: String,
    pub completed: bool,
}

impl Item {
    pub fn new(id: ItemId, name: String) -> Self {
        Self {
            id,
            name,
            completed: false,
        }
    }

    pub fn to_record(&self) -> PurchaseRecord {
        PurchaseRecord::new(self.name.clone(), self.completed)
    }
}

/// Trim a user-supplied name, `None` if nothing is left.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Eggs "), Some("Eggs".to_string()));
        assert_eq!(normalize_name("   "), None);
        assert_eq!(normalize_name(""), None);
    }

    #[test]
    fn test_record_wire_format() {
        let json = r#"[{"name":"Bread","completed":false},{"name":"Milk","completed":true}]"#;
        let records: Vec<PurchaseRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0], PurchaseRecord::new("Bread", false));
        assert!(records[1].completed);
    }

    #[test]
    fn test_item_id_serializes_as_number() {
        let item = Item::new(ItemId(7), "Tea".to_string());
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(item.to_record(), PurchaseRecord::new("Tea", false));
    }
}
