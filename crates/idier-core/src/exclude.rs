//! Exclusion rules applied during the walk.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::ConfigError;

/// Names skipped everywhere: version control metadata, dependency caches and
/// files the operating system drops into folders on its own.
pub const DEFAULT_NOISE_PATTERNS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
];

/// Predicate deciding which walk entries are skipped together with their
/// whole subtree.
///
/// The archive directory is matched by its exact path rather than by name,
/// so a customized archive location is excluded and an unrelated folder that
/// happens to be called `_Archive` is not.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    patterns: Vec<String>,
    globs: GlobSet,
    archive: Option<PathBuf>,
}

impl ExclusionMatcher {
    /// Build a matcher from the default noise list, `extra` glob patterns and
    /// an optional archive path.
    pub fn new(extra: &[String], archive: Option<PathBuf>) -> Result<Self, ConfigError> {
        let patterns: Vec<String> = DEFAULT_NOISE_PATTERNS
            .iter()
            .map(|p| (*p).to_string())
            .chain(extra.iter().cloned())
            .collect();

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
            builder.add(glob);
        }
        let globs = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            patterns,
            globs,
            archive,
        })
    }

    /// The same rules without the archive entry, for listing the archive's
    /// own contents.
    pub fn without_archive(&self) -> Self {
        Self {
            archive: None,
            ..self.clone()
        }
    }

    /// Whether `path` (and everything beneath it) must be skipped while
    /// walking `root`.
    ///
    /// Globs see the entry's name and its path relative to `root`, never the
    /// directories above the root.
    pub fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        if self.archive.as_deref() == Some(path) {
            return true;
        }
        if let Some(name) = path.file_name() {
            if self.globs.is_match(name) {
                return true;
            }
        }
        match path.strip_prefix(root) {
            Ok(relative) => self.globs.is_match(relative),
            Err(_) => false,
        }
    }

    /// Archive directory excluded by this matcher, if any.
    pub fn archive(&self) -> Option<&Path> {
        self.archive.as_deref()
    }

    /// Glob patterns in effect, defaults first.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for ExclusionMatcher {
    fn default() -> Self {
        // The built-in list always compiles.
        Self::new(&[], None).unwrap_or_else(|_| Self {
            patterns: Vec::new(),
            globs: GlobSet::empty(),
            archive: None,
        })
    }
}
