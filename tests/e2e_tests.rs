use std::ffi::OsString;
use std::fs::{self, FileTimes};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

use attic::{AppConfig, CleanupEngine, DuplicateKey, SilentReporter, UndoOutcome};

const MB: usize = 1024 * 1024;

fn write_aged(path: &Path, size: usize, age_days: u64) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, vec![0xAAu8; size]).unwrap();
    let when = SystemTime::now() - Duration::from_secs(age_days * 24 * 60 * 60);
    let file = fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_times(FileTimes::new().set_accessed(when).set_modified(when))
        .unwrap();
}

/// Layout:
///   root/
///     A/old.txt   (10MB, 400 days unaccessed)
///     B/old.txt   (10MB, 400 days unaccessed)  <- same size and name as A/old.txt
///     C/new.txt   (5MB, 1 day unaccessed)
fn create_test_tree(root: &Path) {
    write_aged(&root.join("A/old.txt"), 10 * MB, 400);
    write_aged(&root.join("B/old.txt"), 10 * MB, 400);
    write_aged(&root.join("C/new.txt"), 5 * MB, 1);
}

fn engine_for(root: &Path) -> CleanupEngine {
    CleanupEngine::new(AppConfig {
        root_path: root.to_path_buf(),
        retention_days: 365,
        exclude_system: false,
        ..AppConfig::default()
    })
}

fn trash_names(trash: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(trash) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

#[test]
fn test_scan_and_group_duplicates() {
    let tmp = tempdir().unwrap();
    let root = &tmp.path().canonicalize().unwrap();
    create_test_tree(root);

    let engine = engine_for(root);
    let report = engine.scan(&SilentReporter).unwrap();

    assert_eq!(report.files.len(), 2);
    assert!(report.files.iter().all(|f| f.size == (10 * MB) as u64));

    let groups = engine.group_duplicates(&report.files);
    assert_eq!(groups.len(), 1);

    let key = DuplicateKey {
        size: (10 * MB) as u64,
        name: OsString::from("old.txt"),
    };
    assert_eq!(
        groups[&key],
        vec![root.join("A/old.txt"), root.join("B/old.txt")]
    );
}

#[test]
fn test_delete_both_then_undo_in_reverse_order() {
    let tmp = tempdir().unwrap();
    let root = &tmp.path().canonicalize().unwrap();
    create_test_tree(root);

    let engine = engine_for(root);
    let trash = engine.trash_dir().to_path_buf();
    let a = root.join("A/old.txt");
    let b = root.join("B/old.txt");

    engine.soft_delete(&a).unwrap();
    assert_eq!(trash_names(&trash), vec!["old.txt"]);

    let second = engine.soft_delete(&b).unwrap();
    assert_eq!(second.trash_path, trash.join("old_copy.txt"));
    assert_eq!(trash_names(&trash), vec!["old.txt", "old_copy.txt"]);

    match engine.undo_last().unwrap() {
        UndoOutcome::Restored(action) => assert_eq!(action.original_path, b),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(b.is_file());
    assert!(!a.exists());
    assert_eq!(trash_names(&trash), vec!["old.txt"]);

    match engine.undo_last().unwrap() {
        UndoOutcome::Restored(action) => assert_eq!(action.original_path, a),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(fs::metadata(&a).unwrap().len(), (10 * MB) as u64);
    assert!(trash_names(&trash).is_empty());

    assert_eq!(engine.undo_last().unwrap(), UndoOutcome::NoOpEmpty);
}

#[test]
fn test_trashed_files_drop_out_of_next_scan() {
    let tmp = tempdir().unwrap();
    let root = &tmp.path().canonicalize().unwrap();
    create_test_tree(root);

    let engine = engine_for(root);
    engine.soft_delete(&root.join("A/old.txt")).unwrap();

    let report = engine.scan(&SilentReporter).unwrap();
    let paths: Vec<_> = report.files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(paths, vec![root.join("B/old.txt")]);
    assert!(engine.group_duplicates(&report.files).is_empty());
}

#[test]
fn test_delete_of_vanished_file_is_reported() {
    let tmp = tempdir().unwrap();
    let root = &tmp.path().canonicalize().unwrap();
    create_test_tree(root);

    let engine = engine_for(root);
    let report = engine.scan(&SilentReporter).unwrap();

    // The file disappears between scan and action.
    fs::remove_file(&report.files[0].path).unwrap();

    let err = engine.soft_delete(&report.files[0].path).unwrap_err();
    assert!(matches!(err, attic::Error::Relocation { .. }));
    assert!(engine.action_log().is_empty());

    engine.soft_delete(&report.files[1].path).unwrap();
    assert_eq!(engine.action_log().len(), 1);
}
