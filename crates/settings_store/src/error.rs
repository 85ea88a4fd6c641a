//! Storage error types.

use uuid::Uuid;

/// Errors that can occur while loading or saving records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row with this ID exists in the table.
    #[error("record {0} not found")]
    RecordNotFound(Uuid),

    /// The column was never registered as holding a settings container.
    #[error("column '{0}' is not registered as a settings container")]
    UnregisteredColumn(String),

    /// The column text does not decode to a mapping.
    #[error("corrupt settings container in column '{column}': {reason}")]
    CorruptContainer { column: String, reason: String },

    /// JSON encoding or snapshot error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Snapshot file I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
