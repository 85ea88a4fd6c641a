//! Record table — rows of text columns keyed by record ID.
//!
//! The table stands in for a database table: every row is a map from column
//! name to text. Columns registered with [`RecordTable::serialize_column`]
//! (usually through [`RecordTable::register_model`]) hold a serialised
//! settings container; everything else is opaque text.
//!
//! Rows live in a [`DashMap`] so several record handles can share one table
//! through an `Arc`.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

use dashmap::DashMap;
use settings_access::Configurable;
use settings_schema::BlobFormat;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreError;

/// One stored row: column name to column text.
pub type Row = BTreeMap<String, String>;

/// An in-memory table of rows.
#[derive(Debug)]
pub struct RecordTable {
    /// Human-readable table name (e.g. `"profiles"`).
    name: String,
    /// Columns that hold a settings container, with their format.
    serialized: HashMap<String, BlobFormat>,
    /// Rows keyed by record ID.
    rows: DashMap<Uuid, Row>,
}

impl RecordTable {
    /// Create an empty table with no container columns.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serialized: HashMap::new(),
            rows: DashMap::new(),
        }
    }

    /// Create an empty table with `M`'s settings column registered.
    #[must_use]
    pub fn for_model<M: Configurable>(name: impl Into<String>) -> Self {
        let mut table = Self::new(name);
        table.register_model::<M>();
        table
    }

    /// Register the settings column declared by model `M`.
    pub fn register_model<M: Configurable>(&mut self) {
        let (column, format) = M::registry().serialized_column();
        self.serialize_column(column, format);
    }

    /// Mark `column` as holding a settings container in `format`.
    pub fn serialize_column(&mut self, column: impl Into<String>, format: BlobFormat) {
        let column = column.into();
        debug!(table = self.name, column, ?format, "column stores a settings container");
        self.serialized.insert(column, format);
    }

    /// The container format of `column`, if it was registered.
    #[must_use]
    pub fn serialized_format(&self, column: &str) -> Option<BlobFormat> {
        self.serialized.get(column).copied()
    }

    /// The table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // -- Rows --

    /// Insert a new row under a fresh ID.
    pub fn insert(&self, row: Row) -> Uuid {
        let id = Uuid::new_v4();
        self.rows.insert(id, row);
        id
    }

    /// Insert or replace the row stored under `id`.
    pub fn save(&self, id: Uuid, row: Row) {
        self.rows.insert(id, row);
    }

    /// Returns a copy of the row stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] if there is no such row.
    pub fn load(&self, id: Uuid) -> Result<Row, StoreError> {
        self.rows
            .get(&id)
            .map(|row| row.value().clone())
            .ok_or(StoreError::RecordNotFound(id))
    }

    /// Remove the row stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::RecordNotFound`] if there is no such row.
    pub fn remove(&self, id: Uuid) -> Result<Row, StoreError> {
        self.rows
            .remove(&id)
            .map(|(_, row)| row)
            .ok_or(StoreError::RecordNotFound(id))
    }

    /// Returns `true` if a row is stored under `id`.
    #[must_use]
    pub fn contains(&self, id: Uuid) -> bool {
        self.rows.contains_key(&id)
    }

    /// All record IDs, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.rows.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // -- Snapshots --

    /// Load rows from a JSON snapshot, replacing rows with the same ID.
    ///
    /// A missing file loads nothing. Returns the number of rows read.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Json`] if the file cannot
    /// be read or parsed.
    pub fn load_file(&self, path: &Path) -> Result<usize, StoreError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no snapshot file, starting empty");
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let rows: BTreeMap<Uuid, Row> = serde_json::from_reader(BufReader::new(file))?;
        let count = rows.len();
        for (id, row) in rows {
            self.rows.insert(id, row);
        }
        info!(table = self.name, path = %path.display(), rows = count, "snapshot loaded");
        Ok(count)
    }

    /// Write every row to a JSON snapshot, sorted by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Json`] if the file cannot
    /// be written.
    pub fn save_file(&self, path: &Path) -> Result<(), StoreError> {
        let rows: BTreeMap<Uuid, Row> = self
            .rows
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &rows)?;
        info!(table = self.name, path = %path.display(), rows = rows.len(), "snapshot saved");
        Ok(())
    }
}
