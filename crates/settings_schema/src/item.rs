//! Setting descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::key::SettingKey;
use crate::kind::SettingType;

/// An immutable setting declaration: a key, a semantic type and the value
/// returned while nothing has been written.
///
/// The default is stored verbatim and untyped reads return it as is; typed
/// getters read a mistyped default through [`Item::canonicalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    key: SettingKey,
    #[serde(rename = "type")]
    kind: SettingType,
    default: Value,
}

impl Item {
    /// Create a new descriptor.
    #[must_use]
    pub fn new(key: impl Into<SettingKey>, kind: SettingType, default: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            kind,
            default: default.into(),
        }
    }

    /// The normalised key.
    #[must_use]
    pub fn key(&self) -> &SettingKey {
        &self.key
    }

    /// The semantic type.
    #[must_use]
    pub fn kind(&self) -> SettingType {
        self.kind
    }

    /// The value readers fall back to.
    #[must_use]
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Canonicalise a raw value according to this item's type.
    #[must_use]
    pub fn canonicalize(&self, raw: Value) -> Value {
        self.kind.canonicalize(raw)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_item_accessors() {
        let item = Item::new("title", SettingType::String, "Untitled");
        assert_eq!(item.key().as_str(), "title");
        assert_eq!(item.kind(), SettingType::String);
        assert_eq!(item.default_value(), &json!("Untitled"));
    }

    #[test]
    fn test_default_is_not_canonicalised() {
        let item = Item::new(1, SettingType::Integer, "not a number");
        assert_eq!(item.key().as_str(), "1");
        assert_eq!(item.default_value(), &json!("not a number"));
        assert_eq!(item.canonicalize(json!("not a number")), json!(0));
    }

    #[test]
    fn test_item_serialises_with_type_field() {
        let item = Item::new("enabled", SettingType::Boolean, true);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({"key": "enabled", "type": "boolean", "default": true})
        );
    }
}
