use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// A file that was older than the retention cutoff when it was scanned.
///
/// Nothing guarantees the file still exists (or still has this size) by the
/// time a caller acts on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
    pub accessed: SystemTime,
}

/// Old files sorted by size, largest first. Equal sizes keep traversal order.
pub type ScanResult = Vec<FileEntry>;

/// Files sharing both of these are treated as probable duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DuplicateKey {
    pub size: u64,
    pub name: OsString,
}

/// Every value holds at least two paths, in the order they were scanned.
pub type DuplicateGroups = HashMap<DuplicateKey, Vec<PathBuf>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Delete,
}

/// One completed relocation into the trash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub trash_path: PathBuf,
    pub original_path: PathBuf,
}

impl Action {
    pub fn delete(trash_path: PathBuf, original_path: PathBuf) -> Self {
        Self {
            kind: ActionKind::Delete,
            trash_path,
            original_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    Restored(Action),
    /// Nothing to undo. The filesystem was not touched.
    NoOpEmpty,
}

#[derive(Debug, Default, Clone)]
pub struct ScanSummary {
    pub files_seen: usize,
    pub files_included: usize,
    pub dirs_excluded: usize,
    pub dirs_revisited: usize,
    pub errors: usize,
    pub total_bytes: u64,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub files: ScanResult,
    pub summary: ScanSummary,
}
