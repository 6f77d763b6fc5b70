// src/actions/mod.rs

//! Declarative callback substitutes: what a registration *does* when it fires
//! if the caller configured actions instead of code.
//!
//! Actions are a closed enum, resolved once when a registration (or a config
//! entry) is built; nothing re-dispatches on string tags at firing time. Per
//! firing, the action list runs in order and each action is expanded once per
//! affected path; a failing action is reported and the remaining paths and
//! actions still run.

pub mod cmd;
pub mod notify;

use tracing::warn;

use crate::errors::WatchError;
use crate::watch::state::ChangeEvent;

pub use cmd::PATH_PLACEHOLDER;

/// A single declarative action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print one line per affected path naming the path and change kind.
    Notify,
    /// Substitute `{0}` in the template with the affected path and run the
    /// result as a shell command, once per affected path.
    Cmd { template: String },
}

impl Action {
    /// Execute this action for one changed path, blocking.
    pub fn run(&self, event: &ChangeEvent) -> Result<(), WatchError> {
        match self {
            Action::Notify => {
                notify::notify(event);
                Ok(())
            }
            Action::Cmd { template } => cmd::run(template, event),
        }
    }

    /// Execute this action for one changed path, awaiting any subprocess.
    pub async fn run_async(&self, event: &ChangeEvent) -> Result<(), WatchError> {
        match self {
            Action::Notify => {
                notify::notify(event);
                Ok(())
            }
            Action::Cmd { template } => cmd::run_async(template, event).await,
        }
    }

    /// Short form for logs and `--dry-run` output.
    pub fn describe(&self) -> String {
        match self {
            Action::Notify => "notify".to_string(),
            Action::Cmd { template } => format!("cmd:{template}"),
        }
    }
}

/// Run a whole action list for one dispatch firing, blocking.
///
/// Outer loop is the action list, inner loop the batch's paths, matching the
/// per-path expansion rules for both trigger granularities (a `PerFile`
/// firing's batch is a single event). Failures are collected, never fatal.
pub fn run_all(actions: &[Action], events: &[ChangeEvent]) -> Vec<WatchError> {
    let mut failures = Vec::new();

    for action in actions {
        for event in events {
            if let Err(err) = action.run(event) {
                warn!(action = %action.describe(), error = %err, "action failed");
                failures.push(err);
            }
        }
    }

    failures
}

/// Async twin of [`run_all`]; each action invocation is awaited to completion
/// before the next one starts, preserving list-then-path order.
pub async fn run_all_async(actions: &[Action], events: &[ChangeEvent]) -> Vec<WatchError> {
    let mut failures = Vec::new();

    for action in actions {
        for event in events {
            if let Err(err) = action.run_async(event).await {
                warn!(action = %action.describe(), error = %err, "action failed");
                failures.push(err);
            }
        }
    }

    failures
}
