//! # settings_store
//!
//! The persistence boundary for settings containers.
//!
//! This crate provides:
//!
//! - [`codec`] — JSON/YAML encoding of a container into its column text.
//! - [`RecordTable`] — a concurrent in-memory table of rows keyed by
//!   [`Uuid`](uuid::Uuid), with JSON snapshots on disk.
//! - [`Record`] — a row handle that is a [`SettingsHost`] and saves itself
//!   back into its table.
//! - [`StoreError`] — storage error types, including corrupt containers.
//!
//! [`SettingsHost`]: settings_access::SettingsHost

pub mod codec;
pub mod error;
pub mod record;
pub mod table;

pub use codec::{decode_container, encode_container};
pub use error::StoreError;
pub use record::Record;
pub use table::{RecordTable, Row};
