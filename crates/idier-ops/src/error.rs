//! Errors raised while moving projects into the archive.

use std::path::PathBuf;

use thiserror::Error;

/// A failed archive step. Aborts the rest of the run.
#[derive(Debug, Error)]
pub enum MoveError {
    /// The archive directory could not be created.
    #[error("Failed to create archive {path}: {source}")]
    CreateArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Something already occupies the destination inside the archive.
    #[error("Destination already exists: {destination} (moving {from})")]
    Collision { from: PathBuf, destination: PathBuf },

    /// The archive lives inside the project being moved.
    #[error("Cannot move {from} into its own subtree {destination}")]
    SourceIsAncestor { from: PathBuf, destination: PathBuf },

    /// Permission denied on source or destination.
    #[error("Permission denied moving {from} -> {destination}")]
    PermissionDenied { from: PathBuf, destination: PathBuf },

    /// Any other rename failure (cross-device, device full, vanished source).
    #[error("Failed to move {from} -> {destination}: {source}")]
    Rename {
        from: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MoveError {
    /// Classify a rename failure.
    pub fn io(from: impl Into<PathBuf>, destination: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let from = from.into();
        let destination = destination.into();
        match source.kind() {
            std::io::ErrorKind::AlreadyExists | std::io::ErrorKind::DirectoryNotEmpty => {
                Self::Collision { from, destination }
            }
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { from, destination },
            _ => Self::Rename {
                from,
                destination,
                source,
            },
        }
    }
}
