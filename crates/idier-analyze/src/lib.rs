//! Project analysis for idier.
//!
//! This crate turns a walk into projects and decides which are stale:
//!
//! - **Aggregation** - group files by top-level folder, keep the age of the
//!   most recently modified file
//! - **Selection** - pick projects strictly older than a threshold
//! - **Ordering** - alphabetical for listings, stalest first for archives
//!
//! ```rust,ignore
//! use idier_analyze::{ProjectAggregator, ProjectAnalysis, ProjectOrder};
//! use idier_scan::{ExclusionMatcher, TreeCollector};
//!
//! let root = std::path::Path::new("/path/to/projects");
//! let listing = TreeCollector::new().collect(root, &ExclusionMatcher::default()).unwrap();
//! let analysis = ProjectAnalysis::from_listing(
//!     &ProjectAggregator::new(),
//!     &listing,
//!     &root.join("_Archive"),
//!     180,
//! );
//!
//! for project in &analysis.report(ProjectOrder::Alphabetical).stale {
//!     println!("{} ({} days ago)", project.name, project.age_days);
//! }
//! ```

pub mod aggregate;
mod report;
mod select;

pub use aggregate::{days_since, AgeConfig, AgeConfigBuilder, ProjectAggregator};
pub use report::{format_elapsed, ProjectAnalysis, ScanReport};
pub use select::{select_stale, sort_projects, ProjectOrder};

// Re-export core types
pub use idier_core::{FileDescriptor, ProjectFolder, ProjectSummary};
