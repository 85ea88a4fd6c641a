//! Declaration-layer error types.

/// Errors raised while declaring or looking up settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// No setting with this key was declared on the model.
    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    /// A strict declaration hit a key that is already declared.
    #[error("duplicate setting: {0}")]
    DuplicateSetting(String),
}
