//! Setting registry — the ordered declarations for one model type.
//!
//! A registry is built once when a model type is defined and is read-only
//! afterwards. Each declaration records one [`Item`]; accessors for it are
//! generated by `settings_access`.
//!
//! Redeclaring a key replaces the earlier item in place (last declaration
//! wins) and logs a warning. [`SettingRegistry::try_add`] rejects duplicates
//! instead.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SchemaError;
use crate::item::Item;
use crate::key::SettingKey;
use crate::kind::SettingType;
use crate::options::{BlobFormat, SettingsOptions};

/// Ordered collection of setting declarations plus the model's options.
#[derive(Debug, Clone, Default)]
pub struct SettingRegistry {
    options: SettingsOptions,
    /// Items in declaration order.
    items: Vec<Item>,
    /// Position of each key in `items`.
    index: HashMap<SettingKey, usize>,
}

impl SettingRegistry {
    /// Create an empty registry with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SettingsOptions::default())
    }

    /// Create an empty registry with the given options.
    #[must_use]
    pub fn with_options(options: SettingsOptions) -> Self {
        Self {
            options,
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Start a registry for a derived model: options and items are copied
    /// from `parent`, and later declarations only affect the copy.
    #[must_use]
    pub fn inherit(parent: &SettingRegistry) -> Self {
        parent.clone()
    }

    /// The model's options.
    #[must_use]
    pub fn options(&self) -> &SettingsOptions {
        &self.options
    }

    /// Replace the model's options, keeping the declared items.
    pub fn set_options(&mut self, options: SettingsOptions) -> &mut Self {
        self.options = options;
        self
    }

    /// The column holding the container and the format it is stored in.
    ///
    /// Persistence layers call this when a model is registered so they know
    /// to decode that column as a mapping instead of raw text.
    #[must_use]
    pub fn serialized_column(&self) -> (&str, BlobFormat) {
        (&self.options.using, self.options.format)
    }

    // -- Declaration --

    /// Declare a setting. A duplicate key replaces the earlier declaration.
    pub fn add(
        &mut self,
        key: impl Into<SettingKey>,
        kind: SettingType,
        default: impl Into<Value>,
    ) -> &mut Self {
        let item = Item::new(key, kind, default);
        if let Some(&pos) = self.index.get(item.key()) {
            warn!(key = %item.key(), kind = %kind, "setting redeclared, replacing earlier declaration");
            self.items[pos] = item;
        } else {
            debug!(key = %item.key(), kind = %kind, "setting declared");
            self.index.insert(item.key().clone(), self.items.len());
            self.items.push(item);
        }
        self
    }

    /// Declare a setting, failing if the key is already declared.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateSetting`] if `key` is taken.
    pub fn try_add(
        &mut self,
        key: impl Into<SettingKey>,
        kind: SettingType,
        default: impl Into<Value>,
    ) -> Result<&mut Self, SchemaError> {
        let key = key.into();
        if self.index.contains_key(&key) {
            return Err(SchemaError::DuplicateSetting(key.to_string()));
        }
        Ok(self.add(key, kind, default))
    }

    /// Declare a [`SettingType::String`] setting.
    pub fn string(&mut self, key: impl Into<SettingKey>, default: impl Into<Value>) -> &mut Self {
        self.add(key, SettingType::String, default)
    }

    /// Declare a [`SettingType::Integer`] setting.
    pub fn integer(&mut self, key: impl Into<SettingKey>, default: impl Into<Value>) -> &mut Self {
        self.add(key, SettingType::Integer, default)
    }

    /// Declare a [`SettingType::Float`] setting.
    pub fn float(&mut self, key: impl Into<SettingKey>, default: impl Into<Value>) -> &mut Self {
        self.add(key, SettingType::Float, default)
    }

    /// Declare a [`SettingType::Boolean`] setting.
    pub fn boolean(&mut self, key: impl Into<SettingKey>, default: impl Into<Value>) -> &mut Self {
        self.add(key, SettingType::Boolean, default)
    }

    /// Declare a [`SettingType::Yaml`] setting.
    pub fn yaml(&mut self, key: impl Into<SettingKey>, default: impl Into<Value>) -> &mut Self {
        self.add(key, SettingType::Yaml, default)
    }

    /// Declare a [`SettingType::Object`] setting.
    pub fn object(&mut self, key: impl Into<SettingKey>, default: impl Into<Value>) -> &mut Self {
        self.add(key, SettingType::Object, default)
    }

    // -- Lookup --

    /// Returns the item declared under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Item> {
        self.index.get(key).map(|&pos| &self.items[pos])
    }

    /// Returns the item declared under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSetting`] if nothing is declared there.
    pub fn lookup(&self, key: &str) -> Result<&Item, SchemaError> {
        self.get(key)
            .ok_or_else(|| SchemaError::UnknownSetting(key.to_string()))
    }

    /// Returns `true` if `key` is declared.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate over items in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Returns the number of declared settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn make_registry() -> SettingRegistry {
        let mut registry = SettingRegistry::new();
        registry
            .string("title", "Untitled")
            .integer("count", 0)
            .boolean("enabled", true)
            .object("extra", Value::Null);
        registry
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let registry = make_registry();
        let keys: Vec<_> = registry.iter().map(|i| i.key().as_str()).collect();
        assert_eq!(keys, vec!["title", "count", "enabled", "extra"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_redeclaration_replaces_in_place() {
        let mut registry = make_registry();
        registry.add("count", SettingType::Float, 1.5);
        assert_eq!(registry.len(), 4);
        let item = registry.get("count").unwrap();
        assert_eq!(item.kind(), SettingType::Float);
        assert_eq!(item.default_value(), &json!(1.5));
        let keys: Vec<_> = registry.iter().map(|i| i.key().as_str()).collect();
        assert_eq!(keys[1], "count");
    }

    #[test]
    fn test_try_add_rejects_duplicates() {
        let mut registry = make_registry();
        let err = registry
            .try_add("title", SettingType::String, "")
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateSetting("title".into()));
        assert!(registry.try_add("subtitle", SettingType::String, "").is_ok());
        assert!(registry.contains("subtitle"));
    }

    #[test]
    fn test_lookup_unknown_setting() {
        let registry = make_registry();
        assert_eq!(
            registry.lookup("missing").unwrap_err(),
            SchemaError::UnknownSetting("missing".into())
        );
        assert!(registry.lookup("title").is_ok());
    }

    #[test]
    fn test_numeric_keys_are_normalised() {
        let mut registry = SettingRegistry::new();
        registry.integer(7, 0);
        assert!(registry.contains("7"));
    }

    #[test]
    fn test_inherit_copies_options_and_items() {
        let mut parent = SettingRegistry::with_options(
            SettingsOptions::new()
                .with_column("prefs")
                .with_autosave(false),
        );
        parent.string("title", "Untitled");

        let mut child = SettingRegistry::inherit(&parent);
        child.boolean("archived", false);

        assert_eq!(child.options().using, "prefs");
        assert!(!child.options().autosave);
        assert!(child.contains("title"));
        assert!(child.contains("archived"));
        assert!(!parent.contains("archived"));
    }

    #[test]
    fn test_serialized_column() {
        let registry = SettingRegistry::with_options(
            SettingsOptions::new().with_format(BlobFormat::Yaml),
        );
        assert_eq!(registry.serialized_column(), ("settings", BlobFormat::Yaml));
    }
}
