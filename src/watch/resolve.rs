// src/watch/resolve.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::WatchError;
use crate::watch::spec::{GlobPattern, WatchSpec};
use crate::watch::state::{FileState, Snapshot};

/// Result of expanding a watch spec against the filesystem.
///
/// `failures` carries per-path resolution problems (permission errors and the
/// like). A failed path is degraded to [`FileState::MISSING`] or dropped from
/// the snapshot; it never aborts the resolve as a whole.
#[derive(Debug, Default)]
pub struct Resolution {
    pub snapshot: Snapshot,
    pub failures: Vec<WatchError>,
}

/// Expand a watch spec into the current set of matching paths and their
/// modification signatures.
///
/// Glob specs enumerate the filesystem under the pattern's literal prefix at
/// call time, so the matched set follows files as they are created and
/// removed. Explicit specs track every listed path regardless of existence;
/// a path that is currently absent resolves to [`FileState::MISSING`] so that
/// its later creation or deletion is observable as a state change.
pub fn resolve(spec: &WatchSpec) -> Resolution {
    match spec {
        WatchSpec::Glob(glob) => resolve_glob(glob),
        WatchSpec::Explicit(paths) => resolve_explicit(paths),
    }
}

fn resolve_glob(glob: &GlobPattern) -> Resolution {
    let mut resolution = Resolution::default();
    let root = glob.root();

    if !root.exists() {
        // Nothing matches yet; the pattern may start matching once the
        // directory appears.
        debug!(pattern = %glob.pattern(), root = %root.display(), "walk root does not exist");
        return resolution;
    }

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(pattern = %glob.pattern(), error = %err, "skipping unreadable entry");
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                resolution.failures.push(WatchError::Resolution {
                    path,
                    source: err.into(),
                });
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = normalized(entry.path());
        if !glob.matches(&path) {
            continue;
        }

        match entry.metadata() {
            Ok(meta) => {
                resolution
                    .snapshot
                    .insert(path, FileState::present(meta.modified().ok()));
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "stat failed, treating as missing");
                resolution.failures.push(WatchError::Resolution {
                    path: path.clone(),
                    source: err.into(),
                });
                resolution.snapshot.insert(path, FileState::MISSING);
            }
        }
    }

    resolution
}

fn resolve_explicit(paths: &[PathBuf]) -> Resolution {
    let mut resolution = Resolution::default();

    for path in paths {
        let key = normalized(path);
        let state = match fs::metadata(path) {
            Ok(meta) => FileState::present(meta.modified().ok()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => FileState::MISSING,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "stat failed, treating as missing");
                resolution.failures.push(WatchError::Resolution {
                    path: path.clone(),
                    source: err,
                });
                FileState::MISSING
            }
        };
        resolution.snapshot.insert(key, state);
    }

    resolution
}

/// Strip a leading `./` so snapshot keys match the pattern's own shape
/// regardless of whether the walk started at `.`.
fn normalized(path: &Path) -> PathBuf {
    path.strip_prefix(".")
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
