//! # settings_access
//!
//! Runtime access to settings declared with `settings_schema`.
//!
//! A host type exposes its container through [`SettingsHost`] and its
//! declarations through [`Configurable`]. On top of that this crate provides:
//!
//! - [`accessor`] — the reader, writer and truthiness query for one item.
//! - [`Settings`] — generic `setting` / `set_setting` / `setting_query`
//!   entry points keyed by name.
//! - [`settings!`] — generates typed `key()`, `set_key()` and `is_key()`
//!   methods from a declaration list.
//!
//! ## Usage
//!
//! ```rust
//! use settings_access::{settings, SettingsContainer, SettingsHost};
//!
//! #[derive(Default)]
//! struct Article {
//!     settings: Option<SettingsContainer>,
//! }
//!
//! impl SettingsHost for Article {
//!     fn settings(&self) -> Option<&SettingsContainer> {
//!         self.settings.as_ref()
//!     }
//!     fn settings_mut(&mut self) -> &mut Option<SettingsContainer> {
//!         &mut self.settings
//!     }
//!     fn is_new(&self) -> bool {
//!         true
//!     }
//! }
//!
//! settings! {
//!     Article;
//!     title: String = "Untitled",
//!     views: Integer = 0,
//! }
//!
//! let mut article = Article::default();
//! assert_eq!(article.title(), "Untitled");
//! assert_eq!(article.set_views("1,000").unwrap(), 1000);
//! ```

pub mod accessor;
pub mod error;
pub mod ext;
pub mod host;
pub mod macros;
pub mod value;

pub use error::AccessError;
pub use ext::Settings;
pub use host::{BoxError, Configurable, SettingsHost};
pub use value::SettingValue;

pub use settings_schema::{
    BlobFormat, Item, SchemaError, SettingKey, SettingRegistry, SettingType, SettingsContainer,
    SettingsOptions,
};

#[doc(hidden)]
pub use paste;
#[doc(hidden)]
pub use serde_json;
