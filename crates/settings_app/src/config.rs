//! Application configuration.

use std::path::PathBuf;

/// Default snapshot file for the profile table.
pub const DEFAULT_DB_PATH: &str = "settings.db.json";

/// The environment variable used to override the snapshot path.
pub const DB_PATH_ENV: &str = "SETTINGS_DB";

/// Configuration for one run of the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON snapshot the profile table is loaded from and saved to.
    pub db_path: PathBuf,
}

impl AppConfig {
    /// Read the snapshot path from `SETTINGS_DB`, falling back to
    /// [`DEFAULT_DB_PATH`].
    #[must_use]
    pub fn from_env() -> Self {
        let db_path = std::env::var_os(DB_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);
        Self { db_path }
    }

    /// Override the snapshot path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }
}
