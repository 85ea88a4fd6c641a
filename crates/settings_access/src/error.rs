//! Access-layer error types.

use settings_schema::SchemaError;

use crate::host::BoxError;

/// Errors that can occur while reading or writing settings by name.
///
/// Canonicalisation itself never fails; these only cover unknown keys and
/// failures reported by the host's persistence.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The key is not declared on the model.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The host failed to persist after an autosaving write.
    #[error("failed to persist settings: {0}")]
    Persist(#[source] BoxError),
}
