//! Semantic setting types and write-time canonicalisation.
//!
//! Every value written through a setter passes through
//! [`SettingType::canonicalize`] before it reaches the container, so the
//! container only ever holds post-coercion values. Canonicalisation never
//! fails: malformed input degrades to the type's zero value (`0`, `0.0`,
//! `false`, `""`) or passes through untouched.
//!
//! ## Numeric text
//!
//! Textual input to `Integer` and `Float` settings is first stripped of every
//! character that is not an ASCII digit or `.`, so `"1,000"` becomes `1000`
//! and `"$12.50"` becomes `12.5`. A sign is stripped too, which makes
//! `"-5"` canonicalise to `5`.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use tracing::warn;

/// The semantic type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    /// Textual value.
    String,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// Boolean flag.
    Boolean,
    /// Any value, stored as its YAML text.
    Yaml,
    /// Any value, stored as given.
    Object,
}

impl SettingType {
    /// Returns the lowercase name of the type (e.g. `"integer"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Yaml => "yaml",
            Self::Object => "object",
        }
    }

    /// Coerce a raw value into the canonical stored form for this type.
    ///
    /// | type | rule |
    /// |------|------|
    /// | `String` | null → `""`, scalars → their text, arrays/objects → compact JSON |
    /// | `Integer` | text → stripped digit parse, numbers → truncation, else truthiness as `1`/`0` |
    /// | `Float` | text → stripped float parse, numbers → as-is, else truthiness as `1.0`/`0.0` |
    /// | `Boolean` | `false` for `0`, `"0"`, `""`, `false`, `"false"`, `"f"`, null; `true` otherwise |
    /// | `Yaml` | YAML text of the value |
    /// | `Object` | unchanged |
    #[must_use]
    pub fn canonicalize(self, raw: Value) -> Value {
        match self {
            Self::String => Value::String(to_text(raw)),
            Self::Integer => Value::from(to_integer(&raw)),
            Self::Float => float_value(to_float(&raw)),
            Self::Boolean => Value::Bool(to_boolean(&raw)),
            Self::Yaml => Value::String(to_yaml(raw)),
            Self::Object => raw,
        }
    }
}

impl std::fmt::Display for SettingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns `true` for everything except null and `false`.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Returns `true` if the value counts as blank: null, `false`, a string of
/// only whitespace, or an empty array or object. Numbers are never blank.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(_) => false,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn to_text(raw: Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s,
        other @ (Value::Array(_) | Value::Object(_)) => other.to_string(),
    }
}

fn strip_numeric(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

fn to_integer(raw: &Value) -> i64 {
    match raw {
        Value::String(s) => {
            let stripped = strip_numeric(s);
            let digits: String = stripped.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                0
            } else {
                // Only overflow can fail once the run is non-empty digits.
                digits.parse().unwrap_or(i64::MAX)
            }
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).unwrap_or(i64::MAX)
            } else {
                // `as` truncates toward zero and saturates.
                n.as_f64().map_or(0, |f| f as i64)
            }
        }
        other => i64::from(is_truthy(other)),
    }
}

fn to_float(raw: &Value) -> f64 {
    match raw {
        Value::String(s) => {
            let stripped = strip_numeric(s);
            let bytes = stripped.as_bytes();
            let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if bytes.get(end) == Some(&b'.') {
                end += 1;
                end += bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
            }
            stripped[..end].parse().unwrap_or(0.0)
        }
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        other => {
            if is_truthy(other) {
                1.0
            } else {
                0.0
            }
        }
    }
}

fn float_value(value: f64) -> Value {
    // JSON has no representation for infinities.
    Number::from_f64(value).map_or_else(|| Value::from(0.0), Value::Number)
}

fn to_boolean(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !matches!(s.as_str(), "" | "0" | "false" | "f"),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn to_yaml(raw: Value) -> String {
    match serde_yaml::to_string(&raw) {
        Ok(text) => text,
        Err(e) => {
            warn!(%e, "value has no YAML form, storing its text");
            to_text(raw)
        }
    }
}
