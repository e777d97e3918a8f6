//! Scans rooted at a relative path. Kept in its own test binary because the
//! working directory is process-wide.

use std::env;
use std::fs::{self, FileTimes};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

use attic::{AppConfig, CleanupEngine, SilentReporter};

fn write_aged(path: &Path, age_days: u64) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"stale").unwrap();
    let when = SystemTime::now() - Duration::from_secs(age_days * 24 * 60 * 60);
    let file = fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_times(FileTimes::new().set_accessed(when).set_modified(when))
        .unwrap();
}

#[test]
fn test_dot_root_with_absolute_trash_and_exclusions() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    write_aged(&root.join("keep.txt"), 400);
    write_aged(&root.join("Trash/already_trashed.txt"), 400);
    write_aged(&root.join("system/b.txt"), 400);

    let previous = env::current_dir().unwrap();
    env::set_current_dir(&root).unwrap();

    let with_absolute = CleanupEngine::new(AppConfig {
        root_path: PathBuf::from("."),
        trash_dir: Some(root.join("Trash")),
        excluded_roots: vec![root.join("system")],
        exclude_system: false,
        ..AppConfig::default()
    })
    .scan(&SilentReporter);

    // Default trash dir is `./Trash`, exclusion given relative.
    let with_relative = CleanupEngine::new(AppConfig {
        root_path: PathBuf::from("."),
        excluded_roots: vec![PathBuf::from("system")],
        exclude_system: false,
        ..AppConfig::default()
    })
    .scan(&SilentReporter);

    env::set_current_dir(previous).unwrap();

    for report in [with_absolute.unwrap(), with_relative.unwrap()] {
        let paths: Vec<PathBuf> = report.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, vec![root.join("keep.txt")]);
        assert_eq!(report.summary.dirs_excluded, 2);
    }
}
