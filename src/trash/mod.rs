pub mod action_log;
pub mod relocate;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::model::{Action, ActionKind, UndoOutcome};
pub use action_log::ActionLog;

/// Moves files into a trash directory and moves them back on undo.
///
/// Delete and undo hold the same operation lock, so picking a free name in
/// the trash and renaming into it happen as one step for every caller
/// sharing this manager.
#[derive(Debug)]
pub struct TrashManager {
    trash_dir: PathBuf,
    log: Arc<ActionLog>,
    ops: Mutex<()>,
}

impl TrashManager {
    pub fn new(trash_dir: impl Into<PathBuf>, log: Arc<ActionLog>) -> Self {
        Self {
            trash_dir: trash_dir.into(),
            log,
            ops: Mutex::new(()),
        }
    }

    pub fn trash_dir(&self) -> &Path {
        &self.trash_dir
    }

    pub fn log(&self) -> &Arc<ActionLog> {
        &self.log
    }

    fn lock_ops(&self) -> MutexGuard<'_, ()> {
        self.ops.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Relocate `path` into the trash and record the move.
    ///
    /// Same-named files never overwrite each other in the trash; later ones
    /// get `_copy`, `_copy2`, ... suffixes.
    pub fn soft_delete(&self, path: &Path) -> Result<Action, Error> {
        let _guard = self.lock_ops();

        let metadata = fs::symlink_metadata(path).map_err(|e| Error::relocation(path, e))?;
        if metadata.is_dir() {
            return Err(Error::relocation(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "is a directory"),
            ));
        }
        let file_name = path.file_name().ok_or_else(|| {
            Error::relocation(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;

        fs::create_dir_all(&self.trash_dir).map_err(|e| Error::relocation(path, e))?;

        let destination = relocate::free_destination(&self.trash_dir, file_name);
        relocate::relocate(path, &destination).map_err(|e| Error::relocation(path, e))?;

        let action = Action::delete(destination, path.to_path_buf());
        self.log.push(action.clone());
        info!(
            "Moved to trash: {} -> {}",
            path.display(),
            action.trash_path.display()
        );
        Ok(action)
    }

    /// Reverse the most recent action.
    ///
    /// The action is taken off the log before the restore is attempted and is
    /// not put back if the restore fails.
    pub fn undo_last(&self) -> Result<UndoOutcome, Error> {
        let _guard = self.lock_ops();

        let Some(action) = self.log.pop() else {
            info!("No actions to undo");
            return Ok(UndoOutcome::NoOpEmpty);
        };

        match action.kind {
            ActionKind::Delete => restore(&action)?,
        }

        info!("Restored: {}", action.original_path.display());
        Ok(UndoOutcome::Restored(action))
    }
}

fn restore(action: &Action) -> Result<(), Error> {
    let failed = |reason: String| {
        warn!(
            "Undo of {} failed: {}",
            action.original_path.display(),
            reason
        );
        Error::Restore {
            trash_path: action.trash_path.clone(),
            original_path: action.original_path.clone(),
            reason,
        }
    };

    if let Err(err) = fs::symlink_metadata(&action.trash_path) {
        return Err(failed(format!("file is no longer in the trash: {}", err)));
    }

    if let Some(parent) = action.original_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(failed(format!(
                "directory {} no longer exists",
                parent.display()
            )));
        }
    }

    if relocate::is_occupied(&action.original_path) {
        return Err(failed("another file now exists at the original path".to_string()));
    }

    debug!(
        "Restoring {} -> {}",
        action.trash_path.display(),
        action.original_path.display()
    );
    relocate::relocate(&action.trash_path, &action.original_path)
        .map_err(|e| failed(e.to_string()))
}
