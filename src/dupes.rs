use std::ffi::OsString;
use std::path::Path;

use crate::model::{DuplicateGroups, DuplicateKey, FileEntry};

/// Group scanned files by (size, base name) and keep only keys seen more than
/// once. No file contents are read.
pub fn group_duplicates(files: &[FileEntry]) -> DuplicateGroups {
    let mut groups = DuplicateGroups::new();

    for file in files {
        let key = DuplicateKey {
            size: file.size,
            name: base_name(&file.path),
        };
        groups.entry(key).or_default().push(file.path.clone());
    }

    groups.retain(|_, paths| paths.len() > 1);
    groups
}

/// Bytes that would be reclaimed by keeping exactly one file per group.
pub fn wasted_bytes(groups: &DuplicateGroups) -> u64 {
    groups
        .iter()
        .map(|(key, paths)| key.size * (paths.len() as u64 - 1))
        .sum()
}

fn base_name(path: &Path) -> OsString {
    path.file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| path.as_os_str().to_os_string())
}
