use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::classify::PathClassifier;
use crate::cancel::CancelToken;
use crate::error::Error;
use crate::model::{FileEntry, ScanReport, ScanSummary};
use crate::platform::{self, DirIdentity};
use crate::progress::ProgressReporter;

/// Report progress every this many files.
const PROGRESS_INTERVAL: usize = 500;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub retention: Duration,
    pub follow_symlinks: bool,
}

/// Files last accessed strictly before the returned instant are old.
///
/// `None` when the retention reaches past the representable range, in which
/// case no file qualifies.
pub fn retention_cutoff(now: SystemTime, retention: Duration) -> Option<SystemTime> {
    now.checked_sub(retention)
}

/// Walk `root` and collect regular files not accessed within the retention
/// period, largest first.
///
/// A missing or unreadable root fails the whole call. Anything that goes
/// wrong below the root only skips the affected entry.
pub fn scan(
    root: &Path,
    options: &ScanOptions,
    classifier: &PathClassifier,
    cancel: &CancelToken,
    reporter: &dyn ProgressReporter,
) -> Result<ScanReport, Error> {
    check_root(root)?;

    let start = Instant::now();
    let cutoff = retention_cutoff(SystemTime::now(), options.retention);
    let mut visited: HashSet<DirIdentity> = HashSet::new();
    let mut files: Vec<FileEntry> = Vec::new();
    let mut summary = ScanSummary::default();

    reporter.on_scan_start(&root.to_string_lossy());
    debug!(
        "Scanning {} (follow_symlinks: {}, cutoff: {:?})",
        root.display(),
        options.follow_symlinks,
        cutoff
    );

    let mut walker = WalkDir::new(root)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name()
        .into_iter();

    loop {
        if cancel.is_cancelled() {
            info!("Scan of {} cancelled", root.display());
            return Err(Error::Cancelled);
        }

        let entry = match walker.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(err)) => {
                if err.depth() == 0 {
                    return Err(Error::Traversal {
                        root: root.to_path_buf(),
                        source: err.into(),
                    });
                }
                if let Some(ancestor) = err.loop_ancestor() {
                    debug!("Symlink loop back to {}, skipping", ancestor.display());
                    summary.dirs_revisited += 1;
                } else {
                    warn!("Skipping unreadable entry: {}", err);
                    summary.errors += 1;
                }
                continue;
            }
        };

        let path = entry.path();

        if entry.file_type().is_dir() {
            if classifier.is_excluded(path) {
                debug!("Excluded directory {}", path.display());
                summary.dirs_excluded += 1;
                walker.skip_current_dir();
                continue;
            }
            match entry.metadata() {
                Ok(metadata) => {
                    if let Some(identity) = platform::dir_identity(path, &metadata) {
                        if !visited.insert(identity) {
                            debug!("Already visited {}, skipping", path.display());
                            summary.dirs_revisited += 1;
                            walker.skip_current_dir();
                        }
                    }
                }
                Err(err) => {
                    debug!("Cannot stat directory {}: {}", path.display(), err);
                    summary.errors += 1;
                }
            }
            continue;
        }

        if !entry.file_type().is_file() || classifier.is_ignored(path) {
            continue;
        }

        summary.files_seen += 1;
        if summary.files_seen % PROGRESS_INTERVAL == 0 {
            reporter.on_scan_progress(summary.files_seen, &path.to_string_lossy());
        }

        let (size, accessed) = match stat_file(&entry) {
            Ok(stat) => stat,
            Err(err) => {
                debug!("Skipping {}: {}", path.display(), err);
                summary.errors += 1;
                continue;
            }
        };

        if cutoff.is_some_and(|cutoff| accessed < cutoff) {
            files.push(FileEntry {
                path: path.to_path_buf(),
                size,
                accessed,
            });
        }
    }

    files.sort_by(|a, b| b.size.cmp(&a.size));

    summary.files_included = files.len();
    summary.total_bytes = files.iter().map(|f| f.size).sum();
    summary.duration = start.elapsed();

    reporter.on_scan_complete(summary.files_included, summary.duration.as_secs_f64());
    info!(
        "Scanned {} files under {} in {:.2}s: {} old ({} bytes), {} errors",
        summary.files_seen,
        root.display(),
        summary.duration.as_secs_f64(),
        summary.files_included,
        summary.total_bytes,
        summary.errors,
    );

    Ok(ScanReport { files, summary })
}

fn check_root(root: &Path) -> Result<(), Error> {
    let traversal = |source: io::Error| Error::Traversal {
        root: root.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(root).map_err(traversal)?;
    if !metadata.is_dir() {
        return Err(traversal(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }
    fs::read_dir(root).map_err(traversal)?;
    Ok(())
}

fn stat_file(entry: &DirEntry) -> io::Result<(u64, SystemTime)> {
    let metadata = entry.metadata().map_err(io::Error::from)?;
    let accessed = metadata.accessed()?;
    Ok((metadata.len(), accessed))
}
