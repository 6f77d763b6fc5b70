// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::model::{ConfigFile, RegistrationSpec, WatchEntry};

/// Load a configuration file from a given path and return the raw entries.
///
/// This only performs JSON deserialization (accepting both the single-object
/// and the list form); it does **not** compile globs or resolve action tags.
/// Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<WatchEntry>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: ConfigFile = serde_json::from_str(&contents)
        .with_context(|| format!("parsing JSON config from {:?}", path))?;

    Ok(config.into_entries())
}

/// Load a configuration file and resolve every entry into registration-ready
/// form.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads JSON.
/// - Compiles each entry's glob pattern (or explicit path list).
/// - Resolves action tags into the closed `Action` enum.
/// - Rejects empty configs, empty action lists, and unknown action names.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Vec<RegistrationSpec>> {
    let entries = load_from_path(&path)?;

    if entries.is_empty() {
        anyhow::bail!("config must contain at least one watch entry");
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .into_registration()
                .with_context(|| format!("invalid watch entry #{index}"))
        })
        .collect()
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `watchfs.json` in the current working
/// directory; it exists so config discovery (env var, multiple candidate
/// locations) has a single place to grow.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("watchfs.json")
}
