//! Typed views of stored values.

use serde_json::Value;

/// A Rust type a setting can be read as.
///
/// | setting type | Rust type |
/// |--------------|-----------|
/// | `String`, `Yaml` | [`String`] |
/// | `Integer` | [`i64`] |
/// | `Float` | [`f64`] |
/// | `Boolean` | [`bool`] |
/// | `Object` | [`Value`] |
pub trait SettingValue: Sized + Default {
    /// Returns `None` if `value` does not have this type.
    fn from_setting(value: &Value) -> Option<Self>;
}

impl SettingValue for String {
    fn from_setting(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl SettingValue for i64 {
    fn from_setting(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl SettingValue for f64 {
    fn from_setting(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl SettingValue for bool {
    fn from_setting(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl SettingValue for Value {
    fn from_setting(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}
