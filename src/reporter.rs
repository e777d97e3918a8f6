use attic::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Spinner shown while a scan is running.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.bar.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self, root: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(format!("Scanning {}...", root));
        pb.enable_steady_tick(Duration::from_millis(80));

        if let Some(old) = self.bar().replace(pb) {
            old.finish_and_clear();
        }
    }

    fn on_scan_progress(&self, files_seen: usize, _current_path: &str) {
        if let Some(pb) = self.bar().as_ref() {
            pb.set_message(format!("Scanning... {} files checked", files_seen));
        }
    }

    fn on_scan_complete(&self, files_included: usize, duration_secs: f64) {
        if let Some(pb) = self.bar().take() {
            pb.finish_and_clear();
        }
        eprintln!(
            "  \x1b[32m✓\x1b[0m Scan complete: {} old files in {:.2}s",
            files_included, duration_secs
        );
    }
}
