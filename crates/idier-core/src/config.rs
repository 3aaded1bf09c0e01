//! Run configuration.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::exclude::ExclusionMatcher;

/// Folder name used for the archive when no explicit path is given.
pub const DEFAULT_ARCHIVE_NAME: &str = "_Archive";

/// Default staleness threshold in days.
pub const DEFAULT_AGE_DAYS: u64 = 180;

/// Configuration for one archiving run.
///
/// Built once at the process boundary and passed by reference into every
/// stage; nothing downstream reads arguments or the working directory on
/// its own.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ArchiveConfig {
    /// Directory whose immediate subfolders are the projects.
    pub root: PathBuf,

    /// Archive directory. Defaults to `root/_Archive`.
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    pub archive: Option<PathBuf>,

    /// Projects whose newest file is strictly older than this are stale.
    #[builder(default = "DEFAULT_AGE_DAYS")]
    #[serde(default = "default_age_days")]
    pub age_threshold_days: u64,

    /// Extra glob patterns excluded in addition to the built-in noise list.
    #[builder(default)]
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Skip the confirmation prompt.
    #[builder(default = "false")]
    #[serde(default)]
    pub auto_confirm: bool,

    /// Only list projects and archives; never move anything.
    #[builder(default = "false")]
    #[serde(default)]
    pub list_only: bool,
}

fn default_age_days() -> u64 {
    DEFAULT_AGE_DAYS
}

/// Parse an age threshold given as a whole number of days.
pub fn parse_age_days(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidThreshold {
            value: value.to_string(),
        })
}

impl ArchiveConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let Some(ref root) = self.root else {
            return Err("Root path is required".to_string());
        };
        if root.as_os_str().is_empty() {
            return Err("Root path cannot be empty".to_string());
        }
        if let Some(Some(ref archive)) = self.archive {
            if archive.as_os_str().is_empty() {
                return Err("Archive path cannot be empty".to_string());
            }
            if archive == root {
                return Err("Archive path cannot be the root itself".to_string());
            }
        }
        Ok(())
    }
}

impl ArchiveConfig {
    /// Create a new config builder.
    pub fn builder() -> ArchiveConfigBuilder {
        ArchiveConfigBuilder::default()
    }

    /// Create a config with defaults for the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            archive: None,
            age_threshold_days: DEFAULT_AGE_DAYS,
            exclude_patterns: Vec::new(),
            auto_confirm: false,
            list_only: false,
        }
    }

    /// The archive directory, falling back to `root/_Archive`.
    pub fn archive_path(&self) -> PathBuf {
        self.archive
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_ARCHIVE_NAME))
    }

    /// Resolve root and archive into absolute paths.
    ///
    /// Relative paths are taken against `cwd`. The root must exist and be a
    /// directory. The archive does not need to exist; when its parent does,
    /// the parent is canonicalized so the archive compares equal to paths
    /// produced by walking the canonical root.
    pub fn resolve(&self, cwd: &Path) -> Result<Self, ConfigError> {
        let raw_root = absolutize(&self.root, cwd);
        let root = raw_root.canonicalize().map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ConfigError::RootNotFound {
                path: raw_root.clone(),
            },
            _ => ConfigError::Io {
                path: raw_root.clone(),
                source,
            },
        })?;
        if !root.is_dir() {
            return Err(ConfigError::RootNotADirectory { path: root });
        }

        let archive = match &self.archive {
            Some(archive) => normalize_archive(&absolutize(archive, cwd))?,
            None => root.join(DEFAULT_ARCHIVE_NAME),
        };
        if archive == root {
            return Err(ConfigError::ArchiveIsRoot { path: archive });
        }

        tracing::debug!(root = %root.display(), archive = %archive.display(), "resolved paths");

        Ok(Self {
            root,
            archive: Some(archive),
            ..self.clone()
        })
    }

    /// Build the exclusion matcher for walking the root.
    pub fn matcher(&self) -> Result<ExclusionMatcher, ConfigError> {
        ExclusionMatcher::new(&self.exclude_patterns, Some(self.archive_path()))
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn normalize_archive(archive: &Path) -> Result<PathBuf, ConfigError> {
    if archive.exists() {
        return archive.canonicalize().map_err(|source| ConfigError::Io {
            path: archive.to_path_buf(),
            source,
        });
    }
    match (archive.parent(), archive.file_name()) {
        (Some(parent), Some(name)) if parent.exists() => parent
            .canonicalize()
            .map(|p| p.join(name))
            .map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            }),
        _ => Ok(archive.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_builder() {
        let config = ArchiveConfig::builder()
            .root("/home/user/projects")
            .age_threshold_days(30u64)
            .auto_confirm(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user/projects"));
        assert_eq!(config.age_threshold_days, 30);
        assert!(config.auto_confirm);
        assert!(!config.list_only);
        assert_eq!(
            config.archive_path(),
            PathBuf::from("/home/user/projects/_Archive")
        );
    }

    #[test]
    fn test_parse_age_days() {
        assert_eq!(parse_age_days("180").unwrap(), 180);
        assert_eq!(parse_age_days(" 0 ").unwrap(), 0);
        for bad in ["soon", "-3", "1.5", ""] {
            let err = parse_age_days(bad).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidThreshold { .. }), "{bad}");
        }
        assert!(parse_age_days("soon").unwrap_err().to_string().contains("\"soon\""));
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(ArchiveConfig::builder().build().is_err());
        assert!(ArchiveConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_builder_rejects_archive_equal_to_root() {
        let result = ArchiveConfig::builder()
            .root("/data")
            .archive("/data")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_default_archive() {
        let temp = TempDir::new().unwrap();
        let config = ArchiveConfig::new(temp.path()).resolve(temp.path()).unwrap();
        let root = temp.path().canonicalize().unwrap();

        assert_eq!(config.root, root);
        assert_eq!(config.archive_path(), root.join(DEFAULT_ARCHIVE_NAME));
    }

    #[test]
    fn test_resolve_relative_archive_against_cwd() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("work")).unwrap();
        let config = ArchiveConfig::builder()
            .root("work")
            .archive("old")
            .build()
            .unwrap()
            .resolve(temp.path())
            .unwrap();
        let base = temp.path().canonicalize().unwrap();

        assert_eq!(config.root, base.join("work"));
        assert_eq!(config.archive_path(), base.join("old"));
    }

    #[test]
    fn test_resolve_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = ArchiveConfig::new("nope").resolve(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::RootNotFound { .. }));
    }

    #[test]
    fn test_resolve_root_is_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("file"), "").unwrap();
        let err = ArchiveConfig::new("file").resolve(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::RootNotADirectory { .. }));
    }
}
