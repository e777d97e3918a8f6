pub mod classify;
pub mod walk;

pub use classify::PathClassifier;
pub use walk::{retention_cutoff, scan, ScanOptions};
