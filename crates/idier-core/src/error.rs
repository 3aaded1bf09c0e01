//! Error types for scanning and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a walk.
///
/// There is no partial-result recovery: the first unreadable directory or
/// metadata failure ends the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path disappeared or never existed.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors raised while building or resolving the run configuration.
///
/// All of these surface before anything on disk is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Age threshold could not be parsed as a whole number of days.
    #[error("Invalid age threshold {value:?}: expected a whole number of days")]
    InvalidThreshold { value: String },

    /// Root directory does not exist.
    #[error("Root path does not exist: {path}")]
    RootNotFound { path: PathBuf },

    /// Root exists but is not a directory.
    #[error("Root path is not a directory: {path}")]
    RootNotADirectory { path: PathBuf },

    /// Archive and root point at the same directory.
    #[error("Archive path cannot be the root itself: {path}")]
    ArchiveIsRoot { path: PathBuf },

    /// An exclusion glob failed to compile.
    #[error("Invalid exclude pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Filesystem error while resolving a path.
    #[error("I/O error resolving {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failure.
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl From<crate::config::ArchiveConfigBuilderError> for ConfigError {
    fn from(err: crate::config::ArchiveConfigBuilderError) -> Self {
        Self::Invalid {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));
        assert_eq!(err.to_string(), "Permission denied: /test/path");
    }

    #[test]
    fn test_scan_error_io_other() {
        let err = ScanError::io("/x", std::io::Error::other("boom"));
        assert!(matches!(err, ScanError::Io { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
