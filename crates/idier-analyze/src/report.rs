//! Scan results handed to the presentation layer.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use idier_core::{ProjectFolder, ProjectSummary};
use idier_scan::FileListing;

use crate::aggregate::ProjectAggregator;
use crate::select::{select_stale, sort_projects, ProjectOrder};

/// Projects found under one root, with the stale subset split out.
#[derive(Debug, Clone)]
pub struct ProjectAnalysis {
    /// Root that was walked.
    pub root: PathBuf,
    /// Every project, in order of first encounter.
    pub projects: Vec<ProjectFolder>,
    /// Projects older than the threshold, in the same order.
    pub stale: Vec<ProjectFolder>,
    /// Threshold the stale subset was selected with.
    pub threshold_days: u64,
    /// Number of files the walk produced.
    pub files_scanned: usize,
    /// Walk plus aggregation time.
    pub elapsed: Duration,
}

impl ProjectAnalysis {
    /// Aggregate a walk and select stale projects.
    pub fn from_listing(
        aggregator: &ProjectAggregator,
        listing: &FileListing,
        archive_root: &Path,
        threshold_days: u64,
    ) -> Self {
        let start = Instant::now();
        let projects = aggregator.aggregate(&listing.root, archive_root, &listing.files);
        let stale = select_stale(&projects, threshold_days);

        Self {
            root: listing.root.clone(),
            projects,
            stale,
            threshold_days,
            files_scanned: listing.len(),
            elapsed: listing.elapsed + start.elapsed(),
        }
    }

    /// Whether anything would be archived.
    pub fn has_stale(&self) -> bool {
        !self.stale.is_empty()
    }

    /// Reporting view, with projects in `order` and stale projects stalest first.
    pub fn report(&self, order: ProjectOrder) -> ScanReport {
        ScanReport {
            root: self.root.clone(),
            files_scanned: self.files_scanned,
            project_count: self.projects.len(),
            elapsed_ms: self.elapsed.as_millis() as u64,
            threshold_days: self.threshold_days,
            projects: summaries(&sort_projects(&self.projects, order)),
            stale: summaries(&sort_projects(&self.stale, ProjectOrder::StalestFirst)),
        }
    }
}

/// Serializable summary of one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Root that was walked.
    pub root: PathBuf,
    /// Files the walk produced.
    pub files_scanned: usize,
    /// Projects found.
    pub project_count: usize,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Staleness threshold in days.
    pub threshold_days: u64,
    /// All projects.
    pub projects: Vec<ProjectSummary>,
    /// Stale projects, stalest first.
    pub stale: Vec<ProjectSummary>,
}

fn summaries(projects: &[ProjectFolder]) -> Vec<ProjectSummary> {
    projects.iter().map(ProjectFolder::summary).collect()
}

/// Format elapsed time as `MMmSSsMMMms`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let minutes = total_ms / 60_000;
    let seconds = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    format!("{minutes:02}m{seconds:02}s{millis:03}ms")
}
