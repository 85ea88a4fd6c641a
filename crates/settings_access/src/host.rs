//! Host traits — what a model type must provide to carry settings.

use settings_schema::{SettingRegistry, SettingsContainer};

/// Boxed error returned by a host's persistence.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A record that owns a settings container.
///
/// The container lives in a single field that the persistence layer stores
/// as one serialised column. It is `None` until the first write.
pub trait SettingsHost {
    /// The current container, if one was created or loaded.
    fn settings(&self) -> Option<&SettingsContainer>;

    /// The container slot. Writers fill it in when it is empty.
    fn settings_mut(&mut self) -> &mut Option<SettingsContainer>;

    /// Returns `true` while the record has never been persisted. Autosave is
    /// suppressed for new records.
    fn is_new(&self) -> bool;

    /// Flush the record to storage.
    ///
    /// Returns `None` if the host has no persistence, in which case autosave
    /// is skipped.
    fn persist(&mut self) -> Option<Result<(), BoxError>> {
        None
    }
}

/// A model type with declared settings.
pub trait Configurable {
    /// The declarations shared by every instance of the type.
    fn registry() -> &'static SettingRegistry;
}
