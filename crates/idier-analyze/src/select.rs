//! Staleness selection and project ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use idier_core::ProjectFolder;

/// Display orders for project lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum ProjectOrder {
    /// By folder name, case-insensitively, for the plain project listing.
    #[strum(serialize = "ALPHA_DESC")]
    Alphabetical,
    /// Oldest first, for archive listings.
    #[strum(serialize = "SINCE_MODIFIED_ASC")]
    StalestFirst,
}

/// Projects strictly older than `threshold_days`, in input order.
pub fn select_stale(projects: &[ProjectFolder], threshold_days: u64) -> Vec<ProjectFolder> {
    projects
        .iter()
        .filter(|p| p.is_stale(threshold_days))
        .cloned()
        .collect()
}

/// A sorted copy of `projects`. Ties keep their input order.
pub fn sort_projects(projects: &[ProjectFolder], order: ProjectOrder) -> Vec<ProjectFolder> {
    let mut sorted = projects.to_vec();
    match order {
        ProjectOrder::Alphabetical => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
        ProjectOrder::StalestFirst => {
            sorted.sort_by(|a, b| b.days_since_modified.cmp(&a.days_since_modified))
        }
    }
    sorted
}

/// Case-insensitive name ordering by code point, not locale collation:
/// `é` sorts after `z`. On a tie lowercase sorts first.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
