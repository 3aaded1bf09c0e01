//! Moving stale projects into the archive.

use std::fs;
use std::path::PathBuf;

use idier_core::ProjectFolder;

use crate::confirm::Confirmation;
use crate::error::MoveError;

/// Step reported while archiving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEvent {
    /// The archive directory did not exist and was created.
    ArchiveCreated { path: PathBuf },
    /// A project is about to be renamed.
    Moving { from: PathBuf, destination: PathBuf },
}

/// What an archive run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveOutcome {
    /// Whether the gate allowed the run.
    pub confirmed: bool,
    /// Whether this run created the archive directory.
    pub archive_created: bool,
    /// `(source, destination)` for every completed move, in order.
    pub moved: Vec<(PathBuf, PathBuf)>,
}

/// Moves project folders into the archive directory.
///
/// The archive is created at most once, and only right before the first
/// move. Each project is moved with a single `rename`; there is no
/// copy fallback and no handling of name collisions beyond reporting them.
#[derive(Debug)]
pub struct Archivist {
    archive_root: PathBuf,
    archive_ready: bool,
    archive_created: bool,
}

impl Archivist {
    /// Create an archivist targeting `archive_root`.
    pub fn new(archive_root: impl Into<PathBuf>) -> Self {
        Self {
            archive_root: archive_root.into(),
            archive_ready: false,
            archive_created: false,
        }
    }

    /// Move one project to its archive destination.
    pub fn archive(&mut self, project: &ProjectFolder) -> Result<PathBuf, MoveError> {
        self.move_project(project, &mut |_: &ArchiveEvent| {})
    }

    /// Move every project in order, stopping at the first failure.
    ///
    /// Projects moved before a failure stay moved.
    pub fn archive_all<F>(
        &mut self,
        projects: &[ProjectFolder],
        mut on_event: F,
    ) -> Result<ArchiveOutcome, MoveError>
    where
        F: FnMut(&ArchiveEvent),
    {
        let mut outcome = ArchiveOutcome {
            confirmed: true,
            ..ArchiveOutcome::default()
        };

        for project in projects {
            let destination = self.move_project(project, &mut on_event)?;
            outcome.moved.push((project.source_path.clone(), destination));
        }

        outcome.archive_created = self.archive_created;
        Ok(outcome)
    }

    /// Ask `gate` once, then archive `stale` if it agrees.
    ///
    /// Nothing is asked and nothing is created when `stale` is empty.
    pub fn archive_confirmed<C, F>(
        &mut self,
        stale: &[ProjectFolder],
        gate: &mut C,
        on_event: F,
    ) -> Result<ArchiveOutcome, ArchiveRunError>
    where
        C: Confirmation + ?Sized,
        F: FnMut(&ArchiveEvent),
    {
        if stale.is_empty() {
            return Ok(ArchiveOutcome::default());
        }
        if !gate.confirm(stale).map_err(ArchiveRunError::Confirmation)? {
            tracing::debug!(stale = stale.len(), "archive declined");
            return Ok(ArchiveOutcome::default());
        }
        self.archive_all(stale, on_event).map_err(ArchiveRunError::Move)
    }

    fn move_project(
        &mut self,
        project: &ProjectFolder,
        on_event: &mut dyn FnMut(&ArchiveEvent),
    ) -> Result<PathBuf, MoveError> {
        let from = &project.source_path;
        let destination = &project.archive_destination;

        if destination.starts_with(from) {
            return Err(MoveError::SourceIsAncestor {
                from: from.clone(),
                destination: destination.clone(),
            });
        }

        if self.ensure_archive()? {
            on_event(&ArchiveEvent::ArchiveCreated {
                path: self.archive_root.clone(),
            });
        }

        on_event(&ArchiveEvent::Moving {
            from: from.clone(),
            destination: destination.clone(),
        });
        fs::rename(from, destination).map_err(|e| MoveError::io(from, destination, e))?;
        tracing::info!(from = %from.display(), to = %destination.display(), "archived project");

        Ok(destination.clone())
    }

    /// Create the archive on first use. Returns whether this call created it.
    fn ensure_archive(&mut self) -> Result<bool, MoveError> {
        if self.archive_ready {
            return Ok(false);
        }
        let mut created = false;
        if !self.archive_root.is_dir() {
            fs::create_dir_all(&self.archive_root).map_err(|source| MoveError::CreateArchive {
                path: self.archive_root.clone(),
                source,
            })?;
            created = true;
            self.archive_created = true;
            tracing::info!(path = %self.archive_root.display(), "created archive directory");
        }
        self.archive_ready = true;
        Ok(created)
    }
}

/// Failure of a confirmed archive run.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveRunError {
    /// Reading the decision failed.
    #[error("Failed to read confirmation: {0}")]
    Confirmation(#[source] std::io::Error),

    /// A move failed.
    #[error(transparent)]
    Move(#[from] MoveError),
}
