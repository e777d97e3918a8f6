use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::config::AppConfig;
use crate::dupes;
use crate::error::Error;
use crate::model::{Action, DuplicateGroups, FileEntry, ScanReport, UndoOutcome};
use crate::platform;
use crate::progress::ProgressReporter;
use crate::scanner::{self, PathClassifier, ScanOptions};
use crate::trash::{ActionLog, TrashManager};

/// Entry point for front ends: scan, group, soft delete, undo.
///
/// Each engine owns its own action log, so independent engines in one
/// process never undo each other's work.
pub struct CleanupEngine {
    config: AppConfig,
    trash: TrashManager,
    cancel_token: CancelToken,
}

impl CleanupEngine {
    pub fn new(config: AppConfig) -> Self {
        let trash = TrashManager::new(config.trash_dir(), Arc::new(ActionLog::new()));
        Self {
            config,
            trash,
            cancel_token: CancelToken::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel_token.clone()
    }

    pub fn action_log(&self) -> &Arc<ActionLog> {
        self.trash.log()
    }

    pub fn trash_dir(&self) -> &Path {
        self.trash.trash_dir()
    }

    /// Scan the configured root for files older than the retention period.
    ///
    /// The walk starts from the canonical root, and the trash directory and
    /// excluded roots are resolved the same way, so exclusion holds however
    /// each of them was spelled.
    pub fn scan(&self, reporter: &dyn ProgressReporter) -> Result<ScanReport, Error> {
        self.cancel_token.reset();

        let root = fs::canonicalize(&self.config.root_path).map_err(|source| Error::Traversal {
            root: self.config.root_path.clone(),
            source,
        })?;
        let excluded_roots: Vec<PathBuf> = self
            .config
            .effective_excluded_roots()
            .iter()
            .map(|dir| platform::resolve_path(dir))
            .collect();
        let trash_dir = platform::resolve_path(self.trash.trash_dir());
        debug!("Excluded roots: {:?}, trash: {}", excluded_roots, trash_dir.display());

        let classifier =
            PathClassifier::new(excluded_roots, trash_dir, &self.config.ignore_patterns);
        let options = ScanOptions {
            retention: self.config.retention(),
            follow_symlinks: self.config.follow_symlinks,
        };

        info!(
            "Scanning {} for files unused for {} days...",
            root.display(),
            self.config.retention_days
        );
        scanner::scan(&root, &options, &classifier, &self.cancel_token, reporter)
    }

    pub fn group_duplicates(&self, files: &[FileEntry]) -> DuplicateGroups {
        let groups = dupes::group_duplicates(files);
        debug!("{} duplicate groups", groups.len());
        groups
    }

    pub fn soft_delete(&self, path: &Path) -> Result<Action, Error> {
        self.trash.soft_delete(path)
    }

    pub fn undo_last(&self) -> Result<UndoOutcome, Error> {
        self.trash.undo_last()
    }
}
