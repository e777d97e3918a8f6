use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::error;

use crate::config::{self, is_under_any};

/// Decides which directories (and files) the scanner must not look at.
///
/// Exclusion is by path prefix at component granularity: an excluded root
/// removes its whole subtree, while a sibling that merely shares a string
/// prefix (`Trash2` next to `Trash`) is still scanned.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    excluded_roots: Vec<PathBuf>,
    trash_dir: PathBuf,
    ignore_patterns: Vec<Pattern>,
}

impl PathClassifier {
    pub fn new(excluded_roots: Vec<PathBuf>, trash_dir: PathBuf, ignore_globs: &[String]) -> Self {
        let ignore_patterns = ignore_globs
            .iter()
            .filter_map(|glob| match Pattern::new(glob) {
                Ok(p) => Some(p),
                Err(e) => {
                    error!("Invalid glob pattern '{}': {}", glob, e);
                    None
                }
            })
            .collect();

        Self {
            excluded_roots: config::non_overlapping_directories(excluded_roots),
            trash_dir,
            ignore_patterns,
        }
    }

    /// True if `dir` and everything below it should be skipped.
    pub fn is_excluded(&self, dir: &Path) -> bool {
        dir.starts_with(&self.trash_dir)
            || is_under_any(dir, &self.excluded_roots)
            || self.is_ignored(dir)
    }

    /// True if `path` matches one of the user's ignore globs.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path))
    }

    pub fn trash_dir(&self) -> &Path {
        &self.trash_dir
    }
}
