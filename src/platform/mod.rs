#[cfg(target_os = "windows")]
pub mod windows;

use std::env;
use std::fs::{self, Metadata};
use std::path::{Component, Path, PathBuf};

/// Physical identity of a directory, used to detect revisits through
/// symlinks or bind mounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DirIdentity {
    Inode { dev: u64, ino: u64 },
    Canonical(PathBuf),
}

#[cfg(unix)]
pub fn dir_identity(_path: &Path, metadata: &Metadata) -> Option<DirIdentity> {
    use std::os::unix::fs::MetadataExt;
    Some(DirIdentity::Inode {
        dev: metadata.dev(),
        ino: metadata.ino(),
    })
}

#[cfg(not(unix))]
pub fn dir_identity(path: &Path, _metadata: &Metadata) -> Option<DirIdentity> {
    std::fs::canonicalize(path).ok().map(DirIdentity::Canonical)
}

/// Absolute, symlink-free form of `path`, comparable with paths walked from a
/// canonical root.
///
/// Paths that do not exist yet (a trash directory before the first delete, a
/// system root absent on this machine) resolve through their deepest existing
/// ancestor, with the rest appended as written.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    let absolute = normalize_lexically(&absolute);

    let mut missing = Vec::new();
    let mut current = absolute.as_path();
    while let (Some(parent), Some(name)) = (current.parent(), current.file_name()) {
        missing.push(name.to_os_string());
        if let Ok(mut resolved) = fs::canonicalize(parent) {
            resolved.extend(missing.iter().rev());
            return resolved;
        }
        current = parent;
    }
    absolute
}

/// Drop `.` components and fold `..` into the preceding component.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

#[cfg(target_os = "windows")]
pub fn system_roots() -> Vec<PathBuf> {
    windows::system_roots()
}

#[cfg(target_os = "macos")]
pub fn system_roots() -> Vec<PathBuf> {
    ["/System", "/private/var/vm", "/dev", "/Volumes/Recovery"]
        .iter()
        .map(PathBuf::from)
        .collect()
}

#[cfg(all(unix, not(target_os = "macos")))]
pub fn system_roots() -> Vec<PathBuf> {
    ["/proc", "/sys", "/dev", "/run"]
        .iter()
        .map(PathBuf::from)
        .collect()
}
