// src/watch/state.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

/// Last-observed signature of a single tracked path.
///
/// Two states compare equal iff both fields match; equality is by value, so a
/// path whose mtime has not moved never produces an event, even across
/// separate resolve calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileState {
    pub exists: bool,
    pub mtime: Option<SystemTime>,
}

impl FileState {
    /// State of a path that is currently absent (or unreadable, which the
    /// resolver treats the same way).
    pub const MISSING: FileState = FileState {
        exists: false,
        mtime: None,
    };

    pub fn present(mtime: Option<SystemTime>) -> Self {
        Self {
            exists: true,
            mtime,
        }
    }
}

/// Per-registration mapping from tracked path to its last-observed state.
///
/// A `BTreeMap` keeps the key set ordered, which makes diffs (and therefore
/// dispatch order) deterministic.
pub type Snapshot = BTreeMap<PathBuf, FileState>;

/// What happened to a path between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Created => "created",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// A single detected change, as handed to callbacks and actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Diff a previous snapshot against a freshly resolved one.
///
/// Events come out sorted by path. Per path in the union of both key sets:
///
/// - only in `new`, and present on disk → `Created`
/// - only in `old`, and it was present → `Deleted`
/// - in both: an existence flip wins over any mtime comparison (`false→true`
///   is `Created`, `true→false` is `Deleted`), so a path that reappears after
///   a delete is always a fresh create, never a modify;
/// - in both and present both times with a different mtime → `Modified`
/// - identical states → no event.
///
/// Explicit path lists keep absent paths in the snapshot with
/// `FileState::MISSING`, which is why the existence flip matters: for those
/// registrations create/delete shows up as a state change on an
/// already-tracked key rather than as a key appearing or vanishing.
pub fn diff(old: &Snapshot, new: &Snapshot) -> Vec<ChangeEvent> {
    let mut events = Vec::new();

    for (path, new_state) in new {
        match old.get(path) {
            None => {
                if new_state.exists {
                    events.push(ChangeEvent::new(path.clone(), ChangeKind::Created));
                }
            }
            Some(old_state) => {
                let kind = match (old_state.exists, new_state.exists) {
                    (false, true) => Some(ChangeKind::Created),
                    (true, false) => Some(ChangeKind::Deleted),
                    (true, true) if old_state.mtime != new_state.mtime => {
                        Some(ChangeKind::Modified)
                    }
                    _ => None,
                };
                if let Some(kind) = kind {
                    events.push(ChangeEvent::new(path.clone(), kind));
                }
            }
        }
    }

    for (path, old_state) in old {
        if !new.contains_key(path) && old_state.exists {
            events.push(ChangeEvent::new(path.clone(), ChangeKind::Deleted));
        }
    }

    // Created/Modified entries arrive in key order, Deleted entries were
    // appended afterwards; one sort restores the global path order.
    events.sort_by(|a, b| a.path.cmp(&b.path));
    events
}
