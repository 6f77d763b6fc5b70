// src/errors.rs

//! Crate-wide error types.
//!
//! Registration-time problems (a malformed glob, an empty action list) are
//! caller programming errors and are returned directly. Everything that can go
//! wrong *during* a check (resolution failures, callback failures, command
//! failures) is collected into [`crate::watch::CheckOutcome`] instead of
//! aborting the check, so one misbehaving registration never starves the rest.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// All error kinds produced by the watch engine.
#[derive(Debug, Error)]
pub enum WatchError {
    /// A glob pattern failed to compile at registration time.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A registration was given an empty action list; it could never do
    /// anything when fired.
    #[error("registration has an empty action list")]
    NoActions,

    /// A single path could not be inspected while resolving a watch spec.
    ///
    /// The path in question is degraded to a deleted-like state; the rest of
    /// the resolve is unaffected.
    #[error("resolving {path:?}: {source}")]
    Resolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A programmatic callback returned an error.
    #[error("callback failed: {0}")]
    Callback(anyhow::Error),

    /// A `cmd` action could not be spawned at all.
    #[error("command '{command}' failed to start: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// A `cmd` action ran but exited with a non-zero status.
    #[error("command '{command}' exited with status {code}")]
    CommandStatus { command: String, code: i32 },
}
