// src/config/model.rs

use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Deserialize;

use crate::actions::Action;
use crate::watch::{TriggerType, WatchSpec};

/// Top-level configuration as read from a JSON file: either a single watch
/// entry or a list of them.
///
/// ```json
/// {
///     "path": "media/**",
///     "trigger_type": "any_file",
///     "actions": ["notify", {"action": "cmd", "cmd": "ffprobe {0}"}]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConfigFile {
    Single(WatchEntry),
    Many(Vec<WatchEntry>),
}

impl ConfigFile {
    pub fn into_entries(self) -> Vec<WatchEntry> {
        match self {
            ConfigFile::Single(entry) => vec![entry],
            ConfigFile::Many(entries) => entries,
        }
    }
}

/// One watch entry, before semantic validation.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchEntry {
    /// A glob pattern string, or a list of literal paths.
    pub path: PathField,

    /// `"per_file"` (default) or `"any_file"`.
    #[serde(default)]
    pub trigger_type: TriggerType,

    /// Ordered action list; must not be empty.
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

impl WatchEntry {
    /// Resolve this entry into registration-ready parts.
    ///
    /// This is where the declarative form meets the typed core: the glob is
    /// compiled, every action tag is resolved into the closed [`Action`] enum
    /// (so nothing string-dispatches at firing time), and an entry that could
    /// never do anything is rejected.
    pub fn into_registration(self) -> Result<RegistrationSpec> {
        let spec = match self.path {
            PathField::Pattern(pattern) => WatchSpec::glob(&pattern)?,
            PathField::Paths(paths) => WatchSpec::explicit(paths),
        };

        if self.actions.is_empty() {
            bail!("watch entry has no actions");
        }

        let actions = self
            .actions
            .into_iter()
            .map(ActionEntry::into_action)
            .collect::<Result<Vec<_>>>()?;

        Ok(RegistrationSpec {
            spec,
            trigger: self.trigger_type,
            actions,
        })
    }
}

/// The `path` key: `"src/**/*.py"` or `["a.txt", "b.txt"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PathField {
    Pattern(String),
    Paths(Vec<PathBuf>),
}

/// One element of the `actions` list: a bare name like `"notify"`, or a
/// parameterized object like `{"action": "cmd", "cmd": "cat {0}"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ActionEntry {
    Name(String),
    Parameterized {
        action: String,
        #[serde(default)]
        cmd: Option<String>,
    },
}

impl ActionEntry {
    pub fn into_action(self) -> Result<Action> {
        match self {
            ActionEntry::Name(name) => match name.as_str() {
                "notify" => Ok(Action::Notify),
                other => bail!("unknown action '{other}' (expected \"notify\" or a cmd object)"),
            },
            ActionEntry::Parameterized { action, cmd } => match (action.as_str(), cmd) {
                ("cmd", Some(template)) => Ok(Action::Cmd { template }),
                ("cmd", None) => bail!("cmd action is missing its 'cmd' template"),
                ("notify", _) => Ok(Action::Notify),
                (other, _) => bail!("unknown action '{other}'"),
            },
        }
    }
}

/// A fully validated entry, ready to hand to a watcher.
#[derive(Debug)]
pub struct RegistrationSpec {
    pub spec: WatchSpec,
    pub trigger: TriggerType,
    pub actions: Vec<Action>,
}

impl RegistrationSpec {
    /// One-line form for logs and `--dry-run` output.
    pub fn describe(&self) -> String {
        let actions = self
            .actions
            .iter()
            .map(Action::describe)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} ({}) - actions: {}", self.spec.describe(), self.trigger, actions)
    }
}
