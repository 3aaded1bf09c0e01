//! Archive operations for idier.
//!
//! This crate moves stale project folders into the archive directory, one
//! atomic rename per project, after a single go/no-go decision supplied
//! through [`Confirmation`].

mod archive;
mod confirm;
mod error;

pub use archive::{ArchiveEvent, ArchiveOutcome, ArchiveRunError, Archivist};
pub use confirm::{AutoConfirm, Confirmation};
pub use error::MoveError;
