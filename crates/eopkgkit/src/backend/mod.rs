//! Backend abstraction for eopkg operations.
//!
//! The [`Backend`] trait is the narrow seam between the reconciler and the
//! real package manager: everything the reconciler knows about eopkg is a
//! presence query plus three mutating commands. The marker-matching fragility
//! of the real CLI lives entirely in the [`eopkg`] implementation, and tests
//! substitute a fake.

pub mod eopkg;

use crate::error::Result;

/// Captured output of a mutating eopkg command.
///
/// Exit status is recorded but deliberately not turned into an error by the
/// backend: convergence is judged by re-querying the package afterwards, not
/// by the command's exit code.
#[derive(Debug, Clone, Default)]
pub struct ActionOutput {
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
    /// Whether the command exited zero
    pub success: bool,
}

impl ActionOutput {
    /// Combined output for error messages: stdout, falling back to stderr.
    pub fn combined(&self) -> String {
        if self.stdout.trim().is_empty() {
            self.stderr.trim().to_string()
        } else {
            self.stdout.trim().to_string()
        }
    }
}

/// Backend trait for eopkg operations.
///
/// Implementations must be synchronous and blocking; the reconciler issues
/// one call at a time and never in parallel.
pub trait Backend: Send + Sync {
    /// Check if the package manager responds at all.
    fn is_available(&self) -> bool;

    /// Whether a package is currently installed.
    ///
    /// Any query failure (non-zero exit, missing marker) is reported as
    /// `Ok(false)`, never as an error. A query outage is indistinguishable
    /// from genuine absence.
    fn is_installed(&self, name: &str) -> Result<bool>;

    /// Run the non-interactive install command for one package.
    fn install(&self, name: &str) -> Result<ActionOutput>;

    /// Run the non-interactive remove command for one package.
    fn remove(&self, name: &str) -> Result<ActionOutput>;

    /// Upgrade all installed packages to their latest available versions.
    ///
    /// Unlike install/remove, a non-zero exit here is an error.
    fn upgrade_all(&self) -> Result<()>;
}

/// Get the default backend (real eopkg CLI).
pub fn default_backend() -> Result<eopkg::EopkgBackend> {
    eopkg::EopkgBackend::new()
}
