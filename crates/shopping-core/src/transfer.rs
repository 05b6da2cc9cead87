//! Transfer State
//!
//! Values fetched during a first render, handed to later renders so the
//! same resource is not read twice. Entries live for the page load and
//! are never invalidated.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::FetchError;

/// Typed name of a cached resource
pub struct StateKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StateKey<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for StateKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StateKey<T> {}

impl<T> fmt::Debug for StateKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateKey").field(&self.name).finish()
    }
}

pub const fn make_state_key<T>(name: &'static str) -> StateKey<T> {
    StateKey {
        name,
        _marker: PhantomData,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferState {
    entries: BTreeMap<String, Value>,
}

impl TransferState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value, `None` if absent or stored under a different shape
    pub fn get<T: DeserializeOwned>(&self, key: StateKey<T>) -> Option<T> {
        let value = self.entries.get(key.name)?;
        match T::deserialize(value) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("transfer state entry `{}` has an unexpected shape: {}", key.name, e);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&mut self, key: StateKey<T>, value: &T) -> Result<(), FetchError> {
        let value = serde_json::to_value(value).map_err(|e| FetchError::Transfer(e.to_string()))?;
        self.entries.insert(key.name.to_string(), value);
        Ok(())
    }

    pub fn has_key<T>(&self, key: StateKey<T>) -> bool {
        self.entries.contains_key(key.name)
    }

    pub fn remove<T>(&mut self, key: StateKey<T>) {
        self.entries.remove(key.name);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON that can sit inside a `<script>` element
    pub fn to_json(&self) -> String {
        // A map of JSON values always serializes
        let json = serde_json::to_string(&self.entries).unwrap_or_else(|_| "{}".to_string());
        escape_for_script(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        let trimmed = json.trim();
        if trimmed.is_empty() {
            return Ok(Self::new());
        }
        let entries = serde_json::from_str(trimmed).map_err(|e| FetchError::Transfer(e.to_string()))?;
        Ok(Self { entries })
    }
}

fn escape_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PurchaseRecord;

    const LIST: StateKey<Vec<PurchaseRecord>> = make_state_key("purchases");
    const COUNT: StateKey<u32> = make_state_key("purchases");

    #[test]
    fn test_set_then_get() {
        let mut state = TransferState::new();
        assert!(state.get(LIST).is_none());

        state.set(LIST, &vec![PurchaseRecord::new("Bread", false)]).unwrap();
        assert!(state.has_key(LIST));
        assert_eq!(state.get(LIST).unwrap()[0].name, "Bread");

        state.remove(LIST);
        assert!(state.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_a_miss() {
        let mut state = TransferState::new();
        state.set(LIST, &vec![PurchaseRecord::new("Bread", false)]).unwrap();
        assert_eq!(state.get(COUNT), None);
    }

    #[test]
    fn test_script_safe_json() {
        let mut state = TransferState::new();
        state
            .set(LIST, &vec![PurchaseRecord::new("</script><b>Fish & Chips</b>", false)])
            .unwrap();

        let json = state.to_json();
        assert!(!json.contains('<'));
        assert!(!json.contains('&'));

        let restored = TransferState::from_json(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(TransferState::from_json("  ").unwrap().is_empty());
        assert!(matches!(TransferState::from_json("[1"), Err(FetchError::Transfer(_))));
        assert!(matches!(TransferState::from_json("[]"), Err(FetchError::Transfer(_))));
    }
}
