//! Generic, name-keyed entry points for any configurable host.

use serde_json::{Map, Value};
use settings_schema::SchemaError;

use crate::accessor;
use crate::error::AccessError;
use crate::host::{Configurable, SettingsHost};

/// Read, write and query settings by key.
///
/// Implemented for every type that is both a [`SettingsHost`] and
/// [`Configurable`]. Unlike the methods generated by [`crate::settings!`],
/// these take the key at runtime and reject keys the model never declared.
pub trait Settings: SettingsHost + Configurable + Sized {
    /// Current value of `key`, or its default.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSetting`] if `key` is not declared.
    fn setting(&self, key: &str) -> Result<Value, SchemaError> {
        let item = Self::registry().lookup(key)?;
        Ok(accessor::read(self, item))
    }

    /// Canonicalise and store `raw` under `key`, autosaving if enabled.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Schema`] if `key` is not declared, or
    /// [`AccessError::Persist`] if autosave fails.
    fn set_setting(&mut self, key: &str, raw: impl Into<Value>) -> Result<Value, AccessError> {
        let registry = Self::registry();
        let item = registry.lookup(key)?;
        accessor::write(self, item, registry.options(), raw.into())
    }

    /// Truthiness of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownSetting`] if `key` is not declared.
    fn setting_query(&self, key: &str) -> Result<bool, SchemaError> {
        let item = Self::registry().lookup(key)?;
        Ok(accessor::query(self, item))
    }

    /// Every declared setting with its effective value, keyed by name.
    /// Stored keys that are no longer declared are left out.
    fn settings_snapshot(&self) -> Map<String, Value> {
        Self::registry()
            .iter()
            .map(|item| (item.key().to_string(), accessor::read(self, item)))
            .collect()
    }
}

impl<T: SettingsHost + Configurable> Settings for T {}
