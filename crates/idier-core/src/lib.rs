//! Core types and configuration for idier.
//!
//! This crate provides the data model shared by the scanner, the analyzer
//! and the archivist: file descriptors produced by a walk, project folders
//! derived from them, the run configuration, and the exclusion rules that
//! keep noise out of the walk.

mod config;
mod error;
mod exclude;
mod project;

pub use config::{
    parse_age_days, ArchiveConfig, ArchiveConfigBuilder, ArchiveConfigBuilderError,
    DEFAULT_AGE_DAYS, DEFAULT_ARCHIVE_NAME,
};
pub use error::{ConfigError, ScanError};
pub use exclude::{ExclusionMatcher, DEFAULT_NOISE_PATTERNS};
pub use project::{FileDescriptor, ProjectFolder, ProjectSummary};
