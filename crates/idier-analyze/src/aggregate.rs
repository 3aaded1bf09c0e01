//! Project age aggregation.
//!
//! Groups the files of a walk by their top-level folder and reduces each
//! group to a single number: days since its most recently modified file.

use std::ffi::OsStr;
use std::path::Path;
use std::time::{Duration, SystemTime};

use derive_builder::Builder;
use indexmap::IndexMap;

use idier_core::{FileDescriptor, ProjectFolder};

const SECS_PER_DAY: f64 = 86_400.0;

/// Configuration for age aggregation.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct AgeConfig {
    /// Reference time for age calculations (default: now).
    #[builder(default = "SystemTime::now()")]
    pub reference_time: SystemTime,
}

impl Default for AgeConfig {
    fn default() -> Self {
        Self {
            reference_time: SystemTime::now(),
        }
    }
}

impl AgeConfig {
    /// Create a new config builder.
    pub fn builder() -> AgeConfigBuilder {
        AgeConfigBuilder::default()
    }
}

/// Whole days between `modified` and `reference`, rounded to nearest.
///
/// Modification times in the future count as zero days.
pub fn days_since(reference: SystemTime, modified: SystemTime) -> u64 {
    let age = reference.duration_since(modified).unwrap_or(Duration::ZERO);
    (age.as_secs_f64() / SECS_PER_DAY).round() as u64
}

/// Reduces file descriptors to project folders.
pub struct ProjectAggregator {
    config: AgeConfig,
}

impl ProjectAggregator {
    /// Create an aggregator measuring ages against the current time.
    pub fn new() -> Self {
        Self {
            config: AgeConfig::default(),
        }
    }

    /// Create an aggregator with custom config.
    pub fn with_config(config: AgeConfig) -> Self {
        Self { config }
    }

    /// Group `files` by top-level folder under `root`.
    ///
    /// Folders come back in order of first encounter. Files directly in
    /// `root` belong to no folder and are ignored, so a folder appears only
    /// if at least one file was found beneath it.
    pub fn aggregate(
        &self,
        root: &Path,
        archive_root: &Path,
        files: &[FileDescriptor],
    ) -> Vec<ProjectFolder> {
        let mut projects: IndexMap<&OsStr, ProjectFolder> = IndexMap::new();

        for file in files {
            let Some(name) = file.project_name() else {
                continue;
            };

            let days = days_since(self.config.reference_time, file.modified_at);
            projects
                .entry(name)
                .or_insert_with(|| ProjectFolder::new(name, root, archive_root))
                .fold_age(days);
        }

        tracing::debug!(files = files.len(), projects = projects.len(), "aggregated projects");

        projects.into_values().collect()
    }
}

impl Default for ProjectAggregator {
    fn default() -> Self {
        Self::new()
    }
}
