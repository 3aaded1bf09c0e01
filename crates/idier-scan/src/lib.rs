//! Directory walking for idier.
//!
//! This crate walks a root directory and produces a flat list of file
//! descriptors: one per non-directory entry, carrying its path relative to
//! the root and its modification time.
//!
//! - **Subtree-wide exclusion**: entries rejected by the
//!   [`ExclusionMatcher`] are pruned before jwalk descends into them
//! - **Depth-first, sorted** per directory, serially on the calling thread
//! - **Fail-fast**: the first unreadable directory aborts the walk
//!
//! # Example
//!
//! ```rust,no_run
//! use idier_scan::{ExclusionMatcher, TreeCollector};
//!
//! let matcher = ExclusionMatcher::default();
//! let listing = TreeCollector::new().collect("/path/to/projects".as_ref(), &matcher).unwrap();
//!
//! println!("Found {} files", listing.len());
//! ```

mod collector;

pub use collector::{FileListing, TreeCollector};

// Re-export core types for convenience
pub use idier_core::{ExclusionMatcher, FileDescriptor, ScanError};
