use attic::AppConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "attic")]
#[command(
    about = "Find files nobody has opened in a long time and move them to a trash folder",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List files not accessed within the retention period, largest first
    Scan(ScanArgs),
    /// List old files that share size and name
    Dupes(ScanArgs),
    /// Walk through old files and decide to keep, trash or undo
    Review(ReviewArgs),
    /// Print configuration values
    PrintConfig(ScanArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan (overrides `root_path` from the configuration)
    pub root: Option<PathBuf>,

    /// Days since last access before a file counts as old
    #[arg(long)]
    pub days: Option<u64>,

    /// Trash directory (defaults to `Trash` under the scan root)
    #[arg(long)]
    pub trash: Option<PathBuf>,

    /// Additional directory to skip, with everything below it
    #[arg(long = "exclude", value_name = "DIR")]
    pub excluded_roots: Vec<PathBuf>,

    /// Glob pattern of files or directories to skip
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore_patterns: Vec<String>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Do not skip the platform's system directories
    #[arg(long)]
    pub include_system: bool,
}

#[derive(Debug, Args)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Go straight to the largest files without the duplicate pass
    #[arg(long)]
    pub skip_duplicates: bool,
}

impl ScanArgs {
    /// Layer command line values over the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(root) = &self.root {
            config.root_path = root.clone();
        }
        if let Some(days) = self.days {
            config.retention_days = days;
        }
        if let Some(trash) = &self.trash {
            config.trash_dir = Some(trash.clone());
        }
        config
            .excluded_roots
            .extend(self.excluded_roots.iter().cloned());
        config
            .ignore_patterns
            .extend(self.ignore_patterns.iter().cloned());
        if self.follow_symlinks {
            config.follow_symlinks = true;
        }
        if self.include_system {
            config.exclude_system = false;
        }
    }
}
