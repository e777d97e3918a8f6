use std::ffi::{OsStr, OsString};
use std::fs::{self, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

fn is_cross_device_error(err: &io::Error) -> bool {
    match err.raw_os_error() {
        Some(code) if cfg!(unix) && code == 18 => true, // EXDEV
        Some(code) if cfg!(windows) && code == 17 => true, // ERROR_NOT_SAME_DEVICE
        _ => false,
    }
}

/// Something (even a dangling symlink) already sits at `path`.
pub fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Move `src` to `dest`, falling back to copy + remove across filesystems.
///
/// On failure the filesystem is left as it was: a partial copy is removed
/// and the source stays in place.
pub fn relocate(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(err) if is_cross_device_error(&err) => {
            debug!(
                "{} and {} are on different devices, copying",
                src.display(),
                dest.display()
            );
            copy_then_remove(src, dest)
        }
        Err(err) => Err(err),
    }
}

fn copy_then_remove(src: &Path, dest: &Path) -> io::Result<()> {
    if fs::symlink_metadata(src)?.file_type().is_symlink() {
        return move_link(src, dest);
    }
    let metadata = fs::metadata(src)?;

    let copied = fs::copy(src, dest).and_then(|_| {
        let file = fs::OpenOptions::new().write(true).open(dest)?;
        let mut times = FileTimes::new();
        if let Ok(accessed) = metadata.accessed() {
            times = times.set_accessed(accessed);
        }
        if let Ok(modified) = metadata.modified() {
            times = times.set_modified(modified);
        }
        if let Err(err) = file.set_times(times) {
            debug!("Could not carry timestamps to {}: {}", dest.display(), err);
        }
        file.sync_all()
    });

    let result = copied.and_then(|()| fs::remove_file(src));
    if result.is_err() {
        let _ = fs::remove_file(dest);
    }
    result
}

/// Recreate the link itself at `dest`, so an undo puts back a link and not
/// a copy of its target.
#[cfg(unix)]
fn move_link(src: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(src)?, dest)?;
    let result = fs::remove_file(src);
    if result.is_err() {
        let _ = fs::remove_file(dest);
    }
    result
}

#[cfg(not(unix))]
fn move_link(src: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot move symlink {} across devices", src.display()),
    ))
}

/// First free name for `file_name` inside `dir`: the name itself, then
/// `{stem}_copy{ext}`, `{stem}_copy2{ext}`, `{stem}_copy3{ext}` and so on.
pub fn free_destination(dir: &Path, file_name: &OsStr) -> PathBuf {
    let candidate = dir.join(file_name);
    if !is_occupied(&candidate) {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name.file_stem().unwrap_or(file_name);
    let extension = name.extension();

    let mut attempt = 1u64;
    loop {
        let candidate = dir.join(copy_name(stem, extension, attempt));
        if !is_occupied(&candidate) {
            return candidate;
        }
        attempt += 1;
    }
}

fn copy_name(stem: &OsStr, extension: Option<&OsStr>, attempt: u64) -> OsString {
    let mut name = stem.to_os_string();
    name.push("_copy");
    if attempt > 1 {
        name.push(attempt.to_string());
    }
    if let Some(extension) = extension {
        name.push(".");
        name.push(extension);
    }
    name
}
