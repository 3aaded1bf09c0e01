//! The go/no-go decision taken before anything is moved.

use idier_core::ProjectFolder;

/// Supplies the single proceed decision for an archive run.
///
/// Implementations may block (an interactive prompt does); they are asked
/// exactly once per run and only when there is something to move.
pub trait Confirmation {
    /// Whether to move `stale` into the archive.
    fn confirm(&mut self, stale: &[ProjectFolder]) -> std::io::Result<bool>;
}

/// Always answers with a fixed decision.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmation for AutoConfirm {
    fn confirm(&mut self, _stale: &[ProjectFolder]) -> std::io::Result<bool> {
        Ok(self.0)
    }
}
