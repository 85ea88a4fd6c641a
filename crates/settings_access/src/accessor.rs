//! Reader, writer and truthiness query for a single declared setting.
//!
//! These functions are what the generated accessors and the [`Settings`]
//! entry points call. They operate on the container owned by the host:
//!
//! - [`read`] returns the stored value, or the item's default if the key (or
//!   the whole container) is absent. It never creates the container.
//! - [`write`] creates the container on demand, canonicalises, skips
//!   unchanged values, stores, and autosaves non-new records.
//! - [`query`] reduces the current value to a boolean.
//!
//! [`Settings`]: crate::Settings

use serde_json::Value;
use settings_schema::kind::is_blank;
use settings_schema::{Item, SettingType, SettingsOptions};
use tracing::{debug, trace};

use crate::error::AccessError;
use crate::host::{Configurable, SettingsHost};
use crate::value::SettingValue;

/// Read the current value of `item`, falling back to its default.
#[must_use]
pub fn read<H: SettingsHost + ?Sized>(host: &H, item: &Item) -> Value {
    host.settings()
        .and_then(|container| container.get(item.key().as_str()))
        .cloned()
        .unwrap_or_else(|| item.default_value().clone())
}

/// Read the current value of `item` as `T`.
///
/// A stored value of the wrong type (e.g. from a hand-edited column) falls
/// back to the item's default. A default that is not already of the item's
/// type is read through its canonical form, so `Boolean = 1` reads as `true`.
#[must_use]
pub fn read_as<H, T>(host: &H, item: &Item) -> T
where
    H: SettingsHost + ?Sized,
    T: SettingValue,
{
    T::from_setting(&read(host, item))
        .or_else(|| T::from_setting(item.default_value()))
        .or_else(|| T::from_setting(&item.canonicalize(item.default_value().clone())))
        .unwrap_or_default()
}

/// Truthiness of the current value of `item`.
///
/// Boolean settings report their canonical value, which agrees with the
/// typed getter. Everything else reports whether the value is present, i.e.
/// not blank.
#[must_use]
pub fn query<H: SettingsHost + ?Sized>(host: &H, item: &Item) -> bool {
    let value = read(host, item);
    match item.kind() {
        SettingType::Boolean => item.canonicalize(value) == Value::Bool(true),
        _ => !is_blank(&value),
    }
}

/// Canonicalise `raw` and store it under `item`'s key.
///
/// Steps, in order:
///
/// 1. Create the container from `options` if the host has none.
/// 2. Canonicalise `raw` with the item's type.
/// 3. If the stored value already equals the result (an absent key counts
///    as null), return it without storing or persisting.
/// 4. Store it, marking the key as changed.
/// 5. If `options.autosave` is on and the host is not new, persist. Hosts
///    without persistence are skipped.
///
/// Returns the canonical value.
///
/// # Errors
///
/// Returns [`AccessError::Persist`] if the host's persistence fails. The
/// value stays stored in the container.
pub fn write<H: SettingsHost + ?Sized>(
    host: &mut H,
    item: &Item,
    options: &SettingsOptions,
    raw: Value,
) -> Result<Value, AccessError> {
    let key = item.key().as_str();
    let container = host.settings_mut().get_or_insert_with(options.container);
    let canonical = item.canonicalize(raw);

    let unchanged = match container.get(key) {
        Some(stored) => *stored == canonical,
        None => canonical.is_null(),
    };
    if unchanged {
        trace!(key, "setting unchanged, nothing to store");
        return Ok(canonical);
    }

    container.insert(key, canonical.clone());

    if options.autosave && !host.is_new() {
        if let Some(result) = host.persist() {
            result.map_err(AccessError::Persist)?;
            debug!(key, "record persisted after setting write");
        } else {
            debug!(key, "host cannot persist, skipping autosave");
        }
    }

    Ok(canonical)
}

/// Typed read of a setting declared on `H`.
///
/// Used by the methods [`crate::settings!`] generates; an undeclared key
/// yields `T::default()`.
#[must_use]
pub fn read_declared<H, T>(host: &H, key: &str) -> T
where
    H: SettingsHost + Configurable,
    T: SettingValue,
{
    H::registry()
        .get(key)
        .map(|item| read_as(host, item))
        .unwrap_or_default()
}

/// Typed write of a setting declared on `H`.
///
/// # Errors
///
/// Returns [`AccessError::Schema`] if `key` is not declared, or
/// [`AccessError::Persist`] if autosave fails.
pub fn write_declared<H, T>(host: &mut H, key: &str, raw: Value) -> Result<T, AccessError>
where
    H: SettingsHost + Configurable,
    T: SettingValue,
{
    let registry = H::registry();
    let item = registry.lookup(key)?;
    let canonical = write(host, item, registry.options(), raw)?;
    Ok(T::from_setting(&canonical).unwrap_or_default())
}

/// Truthiness query of a setting declared on `H`. Undeclared keys are
/// `false`.
#[must_use]
pub fn query_declared<H>(host: &H, key: &str) -> bool
where
    H: SettingsHost + Configurable,
{
    H::registry()
        .get(key)
        .is_some_and(|item| query(host, item))
}
