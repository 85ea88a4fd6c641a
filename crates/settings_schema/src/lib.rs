//! # settings_schema
//!
//! Declarations for typed settings that live inside a single serialised
//! container column.
//!
//! This crate provides:
//!
//! - [`SettingsContainer`] — the per-record key-value mapping.
//! - [`SettingKey`] — normalised setting identifiers.
//! - [`SettingType`] — semantic types and their write-time canonicalisation.
//! - [`Item`] — an immutable setting descriptor (key, type, default).
//! - [`SettingsOptions`] — per-model column, container and autosave options.
//! - [`SettingRegistry`] — the ordered, fluent declaration registry.

pub mod container;
pub mod error;
pub mod item;
pub mod key;
pub mod kind;
pub mod options;
pub mod registry;

pub use container::SettingsContainer;
pub use error::SchemaError;
pub use item::Item;
pub use key::SettingKey;
pub use kind::SettingType;
pub use options::{BlobFormat, ContainerFactory, SettingsOptions, DEFAULT_COLUMN};
pub use registry::SettingRegistry;
