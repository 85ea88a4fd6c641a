//! Per-model settings options.

use serde::{Deserialize, Serialize};

use crate::container::SettingsContainer;

/// Default name of the column holding the serialised container.
pub const DEFAULT_COLUMN: &str = "settings";

/// Builds a fresh container the first time a record is written to.
pub type ContainerFactory = fn() -> SettingsContainer;

/// Text format used to serialise the container into its column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobFormat {
    /// Compact JSON.
    #[default]
    Json,
    /// YAML document.
    Yaml,
}

/// Options shared by every setting on a model type.
///
/// Set once at declaration time. Derived models receive a copy through
/// [`crate::SettingRegistry::inherit`].
#[derive(Debug, Clone)]
pub struct SettingsOptions {
    /// Column that stores the serialised container.
    pub using: String,
    /// Constructor for the container created on first write.
    pub container: ContainerFactory,
    /// Persist the record after each write that changes a value.
    pub autosave: bool,
    /// Serialisation format of the column.
    pub format: BlobFormat,
}

impl SettingsOptions {
    /// Options with the default column, an empty container and autosave on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            using: DEFAULT_COLUMN.to_string(),
            container: SettingsContainer::new,
            autosave: true,
            format: BlobFormat::Json,
        }
    }

    /// Store the container in a different column.
    #[must_use]
    pub fn with_column(mut self, using: impl Into<String>) -> Self {
        self.using = using.into();
        self
    }

    /// Turn autosave on or off.
    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Change the column's serialisation format.
    #[must_use]
    pub fn with_format(mut self, format: BlobFormat) -> Self {
        self.format = format;
        self
    }

    /// Use a custom constructor for fresh containers.
    #[must_use]
    pub fn with_container(mut self, container: ContainerFactory) -> Self {
        self.container = container;
        self
    }

    /// Build a fresh container.
    #[must_use]
    pub fn new_container(&self) -> SettingsContainer {
        (self.container)()
    }
}

impl Default for SettingsOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = SettingsOptions::default();
        assert_eq!(options.using, "settings");
        assert!(options.autosave);
        assert_eq!(options.format, BlobFormat::Json);
        assert!(options.new_container().is_empty());
    }

    #[test]
    fn test_builder_overrides() {
        fn seeded() -> SettingsContainer {
            let mut container = SettingsContainer::new();
            container.insert("version", json!(1));
            container.clear_changes();
            container
        }

        let options = SettingsOptions::new()
            .with_column("preferences")
            .with_autosave(false)
            .with_format(BlobFormat::Yaml)
            .with_container(seeded);
        assert_eq!(options.using, "preferences");
        assert!(!options.autosave);
        assert_eq!(options.format, BlobFormat::Yaml);
        assert_eq!(options.new_container().get("version"), Some(&json!(1)));
    }
}
