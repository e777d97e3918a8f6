pub mod prompt;

use chrono::{DateTime, Local};
use std::time::SystemTime;

pub fn format_accessed(accessed: SystemTime) -> String {
    DateTime::<Local>::from(accessed)
        .format("%Y-%m-%d")
        .to_string()
}
