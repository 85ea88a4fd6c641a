//! The per-record settings container.
//!
//! A [`SettingsContainer`] is the in-memory form of the single serialised
//! column that backs every setting on a record. It maps string keys to
//! already-canonicalised values and remembers which keys were written since
//! the last [`SettingsContainer::clear_changes`] so a persistence layer can
//! tell whether a flush is needed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key-value mapping stored in a record's settings column.
///
/// Serialises as a plain JSON/YAML mapping; change tracking is in-memory
/// only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsContainer {
    values: Map<String, Value>,
    #[serde(skip)]
    changed: BTreeSet<String>,
}

impl SettingsContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing mapping. Nothing is marked as changed.
    #[must_use]
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self {
            values,
            changed: BTreeSet::new(),
        }
    }

    /// Returns the stored value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns `true` if a value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Store `value` under `key` and mark the key as changed.
    ///
    /// Returns the previously stored value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        self.changed.insert(key.clone());
        self.values.insert(key, value)
    }

    /// Remove `key`, marking it as changed if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.values.remove(key);
        if removed.is_some() {
            self.changed.insert(key.to_owned());
        }
        removed
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over stored `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Borrow the underlying mapping.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    // -- Change tracking --

    /// Returns `true` if any key was written since the last clear.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Keys written since the last clear, in key order.
    pub fn changed_keys(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }

    /// Forget all change tracking. Call this after a successful flush.
    pub fn clear_changes(&mut self) {
        self.changed.clear();
    }
}

// Change tracking does not take part in equality.
impl PartialEq for SettingsContainer {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl From<Map<String, Value>> for SettingsContainer {
    fn from(values: Map<String, Value>) -> Self {
        Self::from_map(values)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_insert_marks_changed() {
        let mut container = SettingsContainer::new();
        assert!(!container.is_dirty());
        container.insert("title", json!("Hello"));
        assert!(container.is_dirty());
        assert_eq!(container.changed_keys().collect::<Vec<_>>(), vec!["title"]);
        container.clear_changes();
        assert!(!container.is_dirty());
        assert_eq!(container.get("title"), Some(&json!("Hello")));
    }

    #[test]
    fn test_existing_keys_survive_unrelated_writes() {
        let mut container = SettingsContainer::new();
        container.insert("a", json!(1));
        container.insert("b", json!(2));
        assert_eq!(container.get("a"), Some(&json!(1)));
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn test_remove_missing_key_is_not_a_change() {
        let mut container = SettingsContainer::new();
        assert!(container.remove("ghost").is_none());
        assert!(!container.is_dirty());
    }

    #[test]
    fn test_serialises_as_plain_mapping() {
        let mut container = SettingsContainer::new();
        container.insert("count", json!(3));
        let text = serde_json::to_string(&container).unwrap();
        assert_eq!(text, r#"{"count":3}"#);

        let restored: SettingsContainer = serde_json::from_str(&text).unwrap();
        assert_eq!(restored.get("count"), Some(&json!(3)));
        assert!(!restored.is_dirty());
    }
}
