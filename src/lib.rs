//! Find files nobody has opened in a long time, spot probable duplicates and
//! move them to a trash folder with a one-step undo.
//!
//! Front ends drive [`CleanupEngine`] through four calls: `scan`,
//! `group_duplicates`, `soft_delete` and `undo_last`. Everything the engine
//! returns is a plain snapshot; nothing holds references back into it.

pub mod cancel;
pub mod config;
pub mod dupes;
pub mod engine;
pub mod error;
pub mod model;
pub mod platform;
pub mod progress;
pub mod scanner;
pub mod trash;

pub use cancel::CancelToken;
pub use config::AppConfig;
pub use engine::CleanupEngine;
pub use error::Error;
pub use model::{
    Action, ActionKind, DuplicateGroups, DuplicateKey, FileEntry, ScanReport, ScanResult,
    ScanSummary, UndoOutcome,
};
pub use progress::{ProgressReporter, SilentReporter};
pub use trash::{ActionLog, TrashManager};
