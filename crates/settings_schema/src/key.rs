//! Setting identifiers.
//!
//! Keys are always stored in their string form, whatever was passed at
//! declaration time. `42`, `'x'` and `"title"` all become plain strings so
//! that the container only ever sees string keys.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalised setting key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingKey(String);

impl SettingKey {
    /// Create a key from anything that has a string form.
    #[must_use]
    pub fn new(key: impl fmt::Display) -> Self {
        Self(key.to_string())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SettingKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SettingKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SettingKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for SettingKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&String> for SettingKey {
    fn from(key: &String) -> Self {
        Self(key.clone())
    }
}

impl From<char> for SettingKey {
    fn from(key: char) -> Self {
        Self(key.to_string())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SettingKey {
                fn from(key: $ty) -> Self {
                    Self(key.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_keys_are_kept_verbatim() {
        assert_eq!(SettingKey::from("title").as_str(), "title");
        assert_eq!(SettingKey::from(String::from("Title")).as_str(), "Title");
    }

    #[test]
    fn test_numeric_and_char_keys_are_normalised() {
        assert_eq!(SettingKey::from(42u32), SettingKey::from("42"));
        assert_eq!(SettingKey::from(-7i64).as_str(), "-7");
        assert_eq!(SettingKey::from('x'), SettingKey::from("x"));
    }

    #[test]
    fn test_key_serialises_as_plain_string() {
        let json = serde_json::to_string(&SettingKey::from("theme")).unwrap();
        assert_eq!(json, "\"theme\"");
    }
}
