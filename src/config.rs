use config::{Config, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;
use crate::platform;

pub const DEFAULT_RETENTION_DAYS: u64 = 365;
pub const DEFAULT_TRASH_DIR_NAME: &str = "Trash";

const SECS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub root_path: PathBuf,
    pub retention_days: u64,
    /// Add the platform's system directories to `excluded_roots`.
    pub exclude_system: bool,
    pub excluded_roots: Vec<PathBuf>,
    pub ignore_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trash_dir: Option<PathBuf>,
    pub follow_symlinks: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            retention_days: DEFAULT_RETENTION_DAYS,
            exclude_system: true,
            excluded_roots: Vec::new(),
            ignore_patterns: Vec::new(),
            trash_dir: None,
            follow_symlinks: false,
        }
    }
}

impl AppConfig {
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_days.saturating_mul(SECS_PER_DAY))
    }

    /// The configured trash directory, or `Trash` under the scan root.
    pub fn trash_dir(&self) -> PathBuf {
        self.trash_dir
            .clone()
            .unwrap_or_else(|| self.root_path.join(DEFAULT_TRASH_DIR_NAME))
    }

    /// User exclusions plus, when enabled, the platform's system roots.
    pub fn effective_excluded_roots(&self) -> Vec<PathBuf> {
        let mut roots = self.excluded_roots.clone();
        if self.exclude_system {
            roots.extend(platform::system_roots());
        }
        non_overlapping_directories(roots)
    }
}

/// Load `Config.toml` (optional) and then `ATTIC_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, Error> {
    load_configuration_from("Config")
}

fn load_configuration_from(file_name: &str) -> Result<AppConfig, Error> {
    let config = Config::builder()
        .add_source(ConfigFile::with_name(file_name).required(false))
        .add_source(
            Environment::with_prefix("ATTIC")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("excluded_roots")
                .with_list_parse_key("ignore_patterns"),
        )
        .build()?
        .try_deserialize::<AppConfig>()?;
    Ok(config)
}

/// Remove directories that are subdirectories of other directories in the list.
pub fn non_overlapping_directories(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for dir in dirs {
        if result.iter().any(|kept| dir.starts_with(kept)) {
            continue;
        }
        result.retain(|kept| !kept.starts_with(&dir));
        result.push(dir);
    }

    result
}

pub fn is_under_any(path: &Path, roots: &[PathBuf]) -> bool {
    roots.iter().any(|root| path.starts_with(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_overlapping_no_overlap() {
        let dirs = vec![
            PathBuf::from("/home/user/photos"),
            PathBuf::from("/home/user/docs"),
            PathBuf::from("/var/data"),
        ];
        let result = non_overlapping_directories(dirs);
        assert_eq!(result.len(), 3);
        assert!(result.contains(&PathBuf::from("/home/user/photos")));
        assert!(result.contains(&PathBuf::from("/home/user/docs")));
        assert!(result.contains(&PathBuf::from("/var/data")));
    }

    #[test]
    fn test_non_overlapping_with_subdirectory() {
        let dirs = vec![
            PathBuf::from("/home/user/docs"),
            PathBuf::from("/var/data"),
            PathBuf::from("/home/user"),
            PathBuf::from("/home/user/music"),
        ];
        let result = non_overlapping_directories(dirs);
        assert_eq!(
            result,
            vec![PathBuf::from("/var/data"), PathBuf::from("/home/user")]
        );
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.retention(), Duration::from_secs(365 * 86_400));
        assert_eq!(config.trash_dir(), PathBuf::from("./Trash"));
        assert!(config.exclude_system);
        assert!(!config.follow_symlinks);
    }

    #[test]
    fn test_explicit_trash_dir_wins() {
        let config = AppConfig {
            root_path: PathBuf::from("/data"),
            trash_dir: Some(PathBuf::from("/elsewhere/bin")),
            ..AppConfig::default()
        };
        assert_eq!(config.trash_dir(), PathBuf::from("/elsewhere/bin"));
    }

    #[test]
    fn test_effective_excluded_roots() {
        let config = AppConfig {
            exclude_system: false,
            excluded_roots: vec![PathBuf::from("/a"), PathBuf::from("/a/b")],
            ..AppConfig::default()
        };
        assert_eq!(config.effective_excluded_roots(), vec![PathBuf::from("/a")]);

        let with_system = AppConfig {
            exclude_system: true,
            ..config
        };
        for root in platform::system_roots() {
            assert!(is_under_any(&root, &with_system.effective_excluded_roots()));
        }
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("Config");
        std::fs::write(
            base.with_extension("toml"),
            "root_path = \"/data\"\nretention_days = 30\nignore_patterns = [\"*.tmp\"]\n",
        )
        .unwrap();

        let config = load_configuration_from(base.to_str().unwrap()).unwrap();
        assert_eq!(config.root_path, PathBuf::from("/data"));
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.ignore_patterns, vec!["*.tmp".to_string()]);
        assert!(config.exclude_system);
    }

    #[test]
    fn test_bad_config_file_is_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("Config");
        std::fs::write(base.with_extension("toml"), "retention_days = \"soon\"\n").unwrap();

        let err = load_configuration_from(base.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
    }

    #[test]
    fn test_huge_retention_saturates() {
        let config = AppConfig {
            retention_days: u64::MAX,
            ..AppConfig::default()
        };
        assert_eq!(config.retention(), Duration::from_secs(u64::MAX));
    }
}
