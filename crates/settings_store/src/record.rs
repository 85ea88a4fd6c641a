//! Record handles — one row loaded out of a [`RecordTable`].
//!
//! A [`Record`] keeps its plain columns as text and its settings column as a
//! decoded [`SettingsContainer`]. It implements [`SettingsHost`], so it can
//! back a model's settings directly, and its `persist` capability writes the
//! row back into the table.

use std::sync::Arc;

use settings_access::{BoxError, SettingsHost};
use settings_schema::{BlobFormat, SettingsContainer};
use tracing::debug;
use uuid::Uuid;

use crate::codec::{decode_container, encode_container};
use crate::error::StoreError;
use crate::table::{RecordTable, Row};

/// A single record bound to a table.
#[derive(Debug, Clone)]
pub struct Record {
    /// `None` until the record is first saved.
    id: Option<Uuid>,
    /// Plain text columns, excluding the settings column.
    columns: Row,
    /// Decoded settings column.
    settings: Option<SettingsContainer>,
    /// Name of the settings column.
    settings_column: String,
    table: Arc<RecordTable>,
}

impl Record {
    /// Create a new, unsaved record whose settings live in `settings_column`.
    #[must_use]
    pub fn new(table: Arc<RecordTable>, settings_column: impl Into<String>) -> Self {
        Self {
            id: None,
            columns: Row::new(),
            settings: None,
            settings_column: settings_column.into(),
            table,
        }
    }

    /// Load the record stored under `id`, decoding its settings column.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] if the row is missing,
    /// [`StoreError::UnregisteredColumn`] if the table does not know
    /// `settings_column`, or [`StoreError::CorruptContainer`] if the column
    /// does not decode.
    pub fn find(
        table: Arc<RecordTable>,
        settings_column: impl Into<String>,
        id: Uuid,
    ) -> Result<Self, StoreError> {
        let settings_column = settings_column.into();
        let format = container_format(&table, &settings_column)?;
        let mut columns = table.load(id)?;
        let settings = match columns.remove(&settings_column) {
            Some(text) => decode_container(&settings_column, &text, format)?,
            None => None,
        };
        Ok(Self {
            id: Some(id),
            columns,
            settings,
            settings_column,
            table,
        })
    }

    /// The record ID, once saved.
    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// The table this record belongs to.
    #[must_use]
    pub fn table(&self) -> &Arc<RecordTable> {
        &self.table
    }

    /// Returns a plain column's text.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&str> {
        self.columns.get(name).map(String::as_str)
    }

    /// Set a plain column. Writing the settings column this way has no
    /// effect; it is replaced by the encoded container on save.
    pub fn set_column(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.columns.insert(name.into(), value.into());
    }

    /// Write the record into its table, assigning an ID on first save.
    ///
    /// Clears the container's change tracking on success.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnregisteredColumn`] if the table does not know
    /// the settings column, or an encoding error.
    pub fn save(&mut self) -> Result<Uuid, StoreError> {
        let format = container_format(&self.table, &self.settings_column)?;
        let mut row = self.columns.clone();
        match &self.settings {
            Some(container) => {
                row.insert(
                    self.settings_column.clone(),
                    encode_container(container, format)?,
                );
            }
            None => {
                row.remove(&self.settings_column);
            }
        }

        let id = *self.id.get_or_insert_with(Uuid::new_v4);
        self.table.save(id, row);
        if let Some(container) = self.settings.as_mut() {
            container.clear_changes();
        }
        debug!(table = self.table.name(), %id, "record saved");
        Ok(id)
    }
}

fn container_format(table: &RecordTable, column: &str) -> Result<BlobFormat, StoreError> {
    table
        .serialized_format(column)
        .ok_or_else(|| StoreError::UnregisteredColumn(column.to_string()))
}

impl SettingsHost for Record {
    fn settings(&self) -> Option<&SettingsContainer> {
        self.settings.as_ref()
    }

    fn settings_mut(&mut self) -> &mut Option<SettingsContainer> {
        &mut self.settings
    }

    fn is_new(&self) -> bool {
        self.id.is_none()
    }

    fn persist(&mut self) -> Option<Result<(), BoxError>> {
        Some(self.save().map(drop).map_err(BoxError::from))
    }
}
