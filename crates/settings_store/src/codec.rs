//! Container codec helpers.
//!
//! A settings container is stored as one text column. These helpers turn a
//! [`SettingsContainer`] into that text and back, in the format the model
//! declared. Decoding is where a corrupt column surfaces; the access layer
//! above never sees malformed data.

use serde_json::Value;
use settings_schema::{BlobFormat, SettingsContainer};

use crate::error::StoreError;

/// Encode a container to column text.
///
/// # Errors
///
/// Returns [`StoreError::Json`] or [`StoreError::Yaml`] if serialisation
/// fails.
pub fn encode_container(
    container: &SettingsContainer,
    format: BlobFormat,
) -> Result<String, StoreError> {
    let text = match format {
        BlobFormat::Json => serde_json::to_string(container)?,
        BlobFormat::Yaml => serde_yaml::to_string(container)?,
    };
    Ok(text)
}

/// Decode column text into a container.
///
/// Blank text and an explicit null decode to `None`: the record has no
/// container yet.
///
/// # Errors
///
/// Returns [`StoreError::CorruptContainer`] if the text does not parse, or
/// parses to something other than a mapping.
pub fn decode_container(
    column: &str,
    text: &str,
    format: BlobFormat,
) -> Result<Option<SettingsContainer>, StoreError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let corrupt = |reason: String| StoreError::CorruptContainer {
        column: column.to_string(),
        reason,
    };

    let value: Value = match format {
        BlobFormat::Json => serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))?,
        BlobFormat::Yaml => serde_yaml::from_str(text).map_err(|e| corrupt(e.to_string()))?,
    };

    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(SettingsContainer::from_map(map))),
        other => Err(corrupt(format!("expected a mapping, found {other}"))),
    }
}
