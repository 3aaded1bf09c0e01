//! File descriptors and project folders.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A non-directory entry found during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Fully qualified location.
    pub absolute_path: PathBuf,
    /// Location relative to the scan root. Never starts at a root component.
    pub relative_path: PathBuf,
    /// Last modification time.
    pub modified_at: SystemTime,
}

impl FileDescriptor {
    /// Create a new descriptor.
    pub fn new(
        absolute_path: impl Into<PathBuf>,
        relative_path: impl Into<PathBuf>,
        modified_at: SystemTime,
    ) -> Self {
        let relative_path = relative_path.into();
        debug_assert!(
            !relative_path.has_root(),
            "relative path must not be absolute: {}",
            relative_path.display()
        );
        Self {
            absolute_path: absolute_path.into(),
            relative_path,
            modified_at,
        }
    }

    /// Name of the top-level folder this file lives in.
    ///
    /// Returns `None` for files sitting directly in the root: only folders
    /// are ever archived.
    pub fn project_name(&self) -> Option<&OsStr> {
        first_segment(&self.relative_path)
    }
}

fn first_segment(relative: &Path) -> Option<&OsStr> {
    let mut parts = relative.components().filter_map(|c| match c {
        Component::Normal(part) => Some(part),
        _ => None,
    });
    let first = parts.next()?;
    // A single segment is a loose file, not a folder.
    parts.next()?;
    Some(first)
}

/// A top-level subdirectory of the root and where it would go in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFolder {
    /// Folder name for display. Names that are not valid UTF-8 are shown
    /// lossily; the paths below keep the raw name.
    pub name: CompactString,
    /// Absolute path under the root.
    pub source_path: PathBuf,
    /// Absolute path the folder would occupy inside the archive.
    pub archive_destination: PathBuf,
    /// Days since the most recently modified file beneath the folder.
    pub days_since_modified: u64,
}

impl ProjectFolder {
    /// Age before any file has been folded in.
    pub const UNSET_AGE: u64 = u64::MAX;

    /// Create a folder entry with no age yet.
    pub fn new(name: impl AsRef<OsStr>, root: &Path, archive_root: &Path) -> Self {
        let name = name.as_ref();
        Self {
            name: CompactString::from(name.to_string_lossy()),
            source_path: root.join(name),
            archive_destination: archive_root.join(name),
            days_since_modified: Self::UNSET_AGE,
        }
    }

    /// Fold one file's age into the running minimum.
    pub fn fold_age(&mut self, days: u64) {
        self.days_since_modified = self.days_since_modified.min(days);
    }

    /// Whether the folder is strictly older than `threshold_days`.
    pub fn is_stale(&self, threshold_days: u64) -> bool {
        self.days_since_modified > threshold_days
    }

    /// Reporting view of this folder.
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            name: self.name.clone(),
            age_days: self.days_since_modified,
        }
    }
}

/// Name and age of a project, as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Folder name.
    pub name: CompactString,
    /// Days since the most recent modification.
    pub age_days: u64,
}
