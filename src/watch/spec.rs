// src/watch/spec.rs

use std::fmt;
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use serde::Deserialize;

use crate::errors::WatchError;

/// How often a registration's callback fires for a batch of changes.
///
/// - `PerFile`: once per changed path, in path order.
/// - `AnyFile`: once per check cycle, covering all changes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    #[default]
    PerFile,
    AnyFile,
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TriggerType::PerFile => "per_file",
            TriggerType::AnyFile => "any_file",
        };
        f.write_str(s)
    }
}

/// What a registration tracks: a glob pattern expanded against the filesystem
/// on every resolve, or a fixed list of paths that are tracked whether or not
/// they currently exist.
#[derive(Debug, Clone)]
pub enum WatchSpec {
    Glob(GlobPattern),
    Explicit(Vec<PathBuf>),
}

impl WatchSpec {
    /// Build a glob spec, compiling the pattern once.
    ///
    /// Patterns support `*`, `?`, character classes and recursive `**`
    /// segments. A malformed pattern is a caller error and fails here, at
    /// registration time, rather than during a later check.
    pub fn glob(pattern: &str) -> Result<Self, WatchError> {
        Ok(WatchSpec::Glob(GlobPattern::new(pattern)?))
    }

    /// Build an explicit spec from a list of literal paths.
    pub fn explicit<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        WatchSpec::Explicit(paths.into_iter().map(Into::into).collect())
    }

    /// Human-readable form, used in logs and `--dry-run` output.
    pub fn describe(&self) -> String {
        match self {
            WatchSpec::Glob(glob) => glob.pattern().to_string(),
            WatchSpec::Explicit(paths) => format!("{} explicit path(s)", paths.len()),
        }
    }
}

/// A compiled glob pattern plus the directory the resolver walks to expand it.
///
/// The walk root is the pattern's literal prefix: for `src/**/*.rs` it is
/// `src`, for `*.txt` it is `.`. Everything below the root is enumerated and
/// matched against the compiled glob, so the matched set can grow and shrink
/// between resolves as files come and go.
#[derive(Clone)]
pub struct GlobPattern {
    pattern: String,
    matcher: GlobMatcher,
    root: PathBuf,
}

impl fmt::Debug for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobPattern")
            .field("pattern", &self.pattern)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self, WatchError> {
        // literal_separator keeps `*` within one path segment; only `**`
        // crosses directories.
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| WatchError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
            root: literal_prefix(pattern),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Directory to walk when expanding this pattern.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a concrete path (as produced by walking `root`) matches.
    pub fn matches(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }
}

/// Longest leading run of pattern components that contain no glob syntax.
///
/// Falls back to `.` (or `/` for absolute patterns) when the very first
/// component already has a wildcard.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();

    for component in Path::new(pattern).components() {
        match component {
            Component::Normal(part) => {
                let part_str = part.to_string_lossy();
                if part_str.contains(['*', '?', '[', '{']) {
                    break;
                }
                root.push(part);
            }
            other => root.push(other.as_os_str()),
        }
    }

    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}
