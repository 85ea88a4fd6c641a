//! The `Profile` model — a user profile whose preferences live in one
//! settings column.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::Value;
use settings_access::{BoxError, Configurable, SettingsContainer, SettingsHost, settings};
use settings_store::{Record, RecordTable, StoreError};
use uuid::Uuid;

/// A profile row with typed preference settings.
#[derive(Debug, Clone)]
pub struct Profile {
    record: Record,
}

settings! {
    Profile;
    theme: String = "light",
    font_size: Integer = 14,
    line_height: Float = 1.5,
    notifications: Boolean = true,
    signature: Yaml = "",
    shortcuts: Object = Value::Null,
}

impl Profile {
    /// Create a new, unsaved profile in `table`.
    #[must_use]
    pub fn create(table: Arc<RecordTable>) -> Self {
        let column = Self::registry().options().using.clone();
        Self {
            record: Record::new(table, column),
        }
    }

    /// Load the profile stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the row is missing or its settings column
    /// is corrupt.
    pub fn find(table: Arc<RecordTable>, id: Uuid) -> Result<Self, StoreError> {
        let column = Self::registry().options().using.clone();
        Ok(Self {
            record: Record::find(table, column, id)?,
        })
    }

    /// Write the profile into its table.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the settings column cannot be encoded.
    pub fn save(&mut self) -> Result<Uuid, StoreError> {
        self.record.save()
    }

    /// The profile ID, once saved.
    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        self.record.id()
    }
}

impl SettingsHost for Profile {
    fn settings(&self) -> Option<&SettingsContainer> {
        self.record.settings()
    }

    fn settings_mut(&mut self) -> &mut Option<SettingsContainer> {
        self.record.settings_mut()
    }

    fn is_new(&self) -> bool {
        self.record.is_new()
    }

    fn persist(&mut self) -> Option<Result<(), BoxError>> {
        self.record.persist()
    }
}
