//! CLI subcommands.
//!
//! Each command runs against the shared profile table and returns the text
//! to print plus whether the table changed and needs a snapshot written.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value;
use settings_access::{Configurable, Settings, SettingsHost};
use settings_store::RecordTable;
use tracing::info;
use uuid::Uuid;

use crate::profile::Profile;

/// Subcommands understood by the CLI.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the declared settings with their types and defaults.
    Keys,
    /// Create a new profile and print its ID.
    Create,
    /// List stored profile IDs.
    List,
    /// Print every setting of a profile.
    Show {
        /// Profile ID.
        id: Uuid,
    },
    /// Print one setting of a profile.
    Get {
        /// Profile ID.
        id: Uuid,
        /// Setting key.
        key: String,
    },
    /// Print whether a setting is set (truthy / present).
    Query {
        /// Profile ID.
        id: Uuid,
        /// Setting key.
        key: String,
    },
    /// Write one setting of a profile; the value is canonicalised first.
    Set {
        /// Profile ID.
        id: Uuid,
        /// Setting key.
        key: String,
        /// New value.
        value: String,
        /// Parse the value as JSON instead of taking it as text.
        #[arg(long)]
        json: bool,
    },
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text to print on stdout.
    pub output: String,
    /// `true` if the table changed.
    pub dirty: bool,
}

impl Outcome {
    fn read(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            dirty: false,
        }
    }

    fn write(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            dirty: true,
        }
    }
}

/// Run `command` against `table`.
///
/// # Errors
///
/// Returns an error for unknown profiles or keys, corrupt settings columns,
/// invalid `--json` input, or a failed save.
pub fn run(command: Command, table: &Arc<RecordTable>) -> Result<Outcome> {
    match command {
        Command::Keys => {
            let lines: Vec<String> = Profile::registry()
                .iter()
                .map(|item| format!("{}\t{}\t{}", item.key(), item.kind(), item.default_value()))
                .collect();
            Ok(Outcome::read(lines.join("\n")))
        }
        Command::Create => {
            let mut profile = Profile::create(Arc::clone(table));
            let id = profile.save().context("failed to save new profile")?;
            info!(%id, "profile created");
            Ok(Outcome::write(id.to_string()))
        }
        Command::List => {
            let ids: Vec<String> = table.ids().iter().map(Uuid::to_string).collect();
            Ok(Outcome::read(ids.join("\n")))
        }
        Command::Show { id } => {
            let profile = load(table, id)?;
            let snapshot = Value::Object(profile.settings_snapshot());
            Ok(Outcome::read(serde_json::to_string_pretty(&snapshot)?))
        }
        Command::Get { id, key } => {
            let profile = load(table, id)?;
            let value = profile.setting(&key)?;
            Ok(Outcome::read(value.to_string()))
        }
        Command::Query { id, key } => {
            let profile = load(table, id)?;
            Ok(Outcome::read(profile.setting_query(&key)?.to_string()))
        }
        Command::Set {
            id,
            key,
            value,
            json,
        } => {
            let raw = if json {
                serde_json::from_str(&value)
                    .with_context(|| format!("invalid JSON value for '{key}'"))?
            } else {
                Value::String(value)
            };
            let mut profile = load(table, id)?;
            let before = profile.settings().cloned().unwrap_or_default();
            let stored = profile
                .set_setting(&key, raw)
                .with_context(|| format!("failed to set '{key}'"))?;
            if profile.settings().cloned().unwrap_or_default() == before {
                info!(%id, key, "setting unchanged");
                return Ok(Outcome::read(stored.to_string()));
            }
            info!(%id, key, %stored, "setting written");
            Ok(Outcome::write(stored.to_string()))
        }
    }
}

fn load(table: &Arc<RecordTable>, id: Uuid) -> Result<Profile> {
    Profile::find(Arc::clone(table), id).with_context(|| format!("failed to load profile {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> Arc<RecordTable> {
        Arc::new(RecordTable::for_model::<Profile>("profiles"))
    }

    fn create(table: &Arc<RecordTable>) -> Uuid {
        let outcome = run(Command::Create, table).unwrap();
        assert!(outcome.dirty);
        outcome.output.parse().unwrap()
    }

    fn set(table: &Arc<RecordTable>, id: Uuid, key: &str, value: &str, json: bool) -> Outcome {
        run(
            Command::Set {
                id,
                key: key.to_string(),
                value: value.to_string(),
                json,
            },
            table,
        )
        .unwrap()
    }

    fn get(table: &Arc<RecordTable>, id: Uuid, key: &str) -> String {
        run(
            Command::Get {
                id,
                key: key.to_string(),
            },
            table,
        )
        .unwrap()
        .output
    }

    #[test]
    fn test_keys_lists_declarations() {
        let outcome = run(Command::Keys, &make_table()).unwrap();
        assert!(!outcome.dirty);
        assert!(outcome.output.starts_with("theme\tstring\t\"light\""));
        assert_eq!(outcome.output.lines().count(), 6);
    }

    #[test]
    fn test_create_then_get_default() {
        let table = make_table();
        let id = create(&table);
        assert_eq!(get(&table, id, "theme"), "\"light\"");
        assert_eq!(get(&table, id, "font_size"), "14");
    }

    #[test]
    fn test_set_canonicalises_and_persists() {
        let table = make_table();
        let id = create(&table);
        let outcome = set(&table, id, "font_size", "1,000", false);
        assert!(outcome.dirty);
        assert_eq!(outcome.output, "1000");
        assert_eq!(get(&table, id, "font_size"), "1000");

        set(&table, id, "notifications", "f", false);
        let query = run(
            Command::Query {
                id,
                key: "notifications".into(),
            },
            &table,
        )
        .unwrap();
        assert_eq!(query.output, "false");
    }

    #[test]
    fn test_unchanged_set_leaves_table_clean() {
        let table = make_table();
        let id = create(&table);
        assert!(set(&table, id, "theme", "dark", false).dirty);
        let again = set(&table, id, "theme", "dark", false);
        assert!(!again.dirty);
        assert_eq!(again.output, "\"dark\"");
    }

    #[test]
    fn test_set_json_value() {
        let table = make_table();
        let id = create(&table);
        set(&table, id, "shortcuts", r#"{"save":"ctrl+s"}"#, true);
        assert_eq!(get(&table, id, "shortcuts"), r#"{"save":"ctrl+s"}"#);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let table = make_table();
        let id = create(&table);
        let result = run(
            Command::Set {
                id,
                key: "shortcuts".into(),
                value: "{oops".into(),
                json: true,
            },
            &table,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_key_and_profile() {
        let table = make_table();
        let id = create(&table);
        let result = run(
            Command::Get {
                id,
                key: "missing".into(),
            },
            &table,
        );
        assert!(result.is_err());

        let result = run(Command::Show { id: Uuid::new_v4() }, &table);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_survive_a_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");

        let table = make_table();
        let id = create(&table);
        set(&table, id, "theme", "dark", false);
        table.save_file(&path).unwrap();

        let reopened = make_table();
        reopened.load_file(&path).unwrap();
        assert_eq!(get(&reopened, id, "theme"), "\"dark\"");
        assert_eq!(get(&reopened, id, "font_size"), "14");
    }

    #[test]
    fn test_show_and_list() {
        let table = make_table();
        let id = create(&table);
        let listed = run(Command::List, &table).unwrap();
        assert_eq!(listed.output, id.to_string());

        let shown = run(Command::Show { id }, &table).unwrap();
        let snapshot: Value = serde_json::from_str(&shown.output).unwrap();
        assert_eq!(snapshot["theme"], "light");
        assert_eq!(snapshot["line_height"], 1.5);
    }
}
