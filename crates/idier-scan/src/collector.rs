//! JWalk-based tree collector.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use jwalk::{Parallelism, WalkDir};

use idier_core::{ExclusionMatcher, FileDescriptor, ScanError};

/// Files found beneath a root, in walk order.
#[derive(Debug, Clone)]
pub struct FileListing {
    /// Directory the walk started from.
    pub root: PathBuf,
    /// One descriptor per non-excluded, non-directory entry.
    pub files: Vec<FileDescriptor>,
    /// Wall-clock time the walk took.
    pub elapsed: Duration,
}

impl FileListing {
    /// Number of files collected.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the walk found no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Walks a directory tree and records every file's modification time.
///
/// The walk runs serially on the calling thread. Entries within a
/// directory are visited in name order, and each directory's subtree is
/// finished before its next sibling is visited. Symbolic links are recorded
/// as files with their own metadata and never descended into.
#[derive(Debug, Clone, Default)]
pub struct TreeCollector {
    _private: (),
}

impl TreeCollector {
    /// Create a new collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect all files beneath `root`.
    ///
    /// Fails on the first directory that cannot be listed or file whose
    /// metadata cannot be read.
    pub fn collect(&self, root: &Path, matcher: &ExclusionMatcher) -> Result<FileListing, ScanError> {
        let start = Instant::now();

        let root_metadata = std::fs::metadata(root).map_err(|e| ScanError::io(root, e))?;
        if !root_metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let prune_matcher = matcher.clone();
        let prune_root = root.to_path_buf();
        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .min_depth(0)
            .process_read_dir(move |_depth, _path, _state, children| {
                // Dropping an entry here also keeps jwalk from descending into it.
                children.retain(|child| match child {
                    Ok(entry) => !prune_matcher.is_excluded(&prune_root, &entry.path()),
                    Err(_) => true,
                });
            });

        let mut files = Vec::new();

        for entry_result in walker {
            let mut entry = entry_result.map_err(walk_error)?;

            if entry.file_type().is_dir() {
                // jwalk yields an unreadable directory as Ok and parks the
                // failure on the entry itself. The root comes through here too.
                if let Some(err) = entry.read_children_error.take() {
                    return Err(walk_error(err));
                }
                continue;
            }
            if entry.depth == 0 {
                continue;
            }

            let path = entry.path();
            let metadata = entry.metadata().map_err(walk_error)?;
            let modified_at = metadata.modified().map_err(|e| ScanError::io(&path, e))?;

            let Ok(relative) = path.strip_prefix(root) else {
                tracing::warn!(path = %path.display(), "entry outside scan root, skipping");
                continue;
            };
            let relative = relative.to_path_buf();

            files.push(FileDescriptor::new(path, relative, modified_at));

            if files.len() % 1000 == 0 {
                tracing::debug!(files = files.len(), "walk progress");
            }
        }

        let elapsed = start.elapsed();
        tracing::debug!(
            root = %root.display(),
            files = files.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "walk finished"
        );

        Ok(FileListing {
            root: root.to_path_buf(),
            files,
            elapsed,
        })
    }
}

/// Convert a jwalk error into a fatal scan error.
fn walk_error(err: jwalk::Error) -> ScanError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    let kind = err
        .io_error()
        .map(std::io::Error::kind)
        .unwrap_or(std::io::ErrorKind::Other);
    ScanError::io(path, std::io::Error::new(kind, err.to_string()))
}
