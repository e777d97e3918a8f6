use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The scan root is missing or unreadable. No partial result is returned.
    #[error("Cannot traverse {}: {source}", .root.display())]
    Traversal {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A soft delete did not happen. The source file was left where it was.
    #[error("Cannot move {} to trash: {source}", .path.display())]
    Relocation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An undo did not happen. The log entry has already been consumed.
    #[error("Cannot restore {} from {}: {reason}", .original_path.display(), .trash_path.display())]
    Restore {
        trash_path: PathBuf,
        original_path: PathBuf,
        reason: String,
    },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub(crate) fn relocation(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Relocation {
            path: path.into(),
            source,
        }
    }
}
