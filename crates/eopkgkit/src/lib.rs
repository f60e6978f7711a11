//! # eopkgkit
//!
//! Pure Rust library for desired-state management of Solus packages via the
//! `eopkg` command-line tool.
//!
//! This crate provides functionality for:
//! - Discovering the eopkg binary and checking package presence
//! - Converging a list of packages to an installed or absent state
//! - Bulk-upgrading installed packages before reconciliation
//! - Reporting whether a run changed anything, in an idempotence-friendly way
//!
//! ## Example
//!
//! ```no_run
//! use eopkgkit::{Client, DesiredState, PackageRequest};
//!
//! // Create a client (fails if eopkg is not installed)
//! let client = Client::new().expect("eopkg not available");
//!
//! // Converge two packages to installed
//! let request = PackageRequest::new(["nano", "htop"], DesiredState::Present)
//!     .expect("valid package names");
//! let outcome = client.reconcile(&request).expect("reconcile failed");
//!
//! if outcome.changed() {
//!     println!("{}", outcome.summary());
//! }
//! ```
//!
//! ## Testing
//!
//! All reconciliation logic runs against the [`backend::Backend`] trait, so
//! tests substitute an in-memory fake instead of touching the real system.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod reconcile;
pub mod types;

pub use error::{Error, Result};
pub use types::{Action, DesiredState, Outcome, PackageRequest};

use backend::{Backend, eopkg::EopkgBackend};
use std::path::PathBuf;

/// High-level client for eopkg operations.
///
/// Wraps a backend and provides the reconciliation entry point plus the
/// individual query/install/remove/upgrade operations it is built from.
pub struct Client {
    backend: Box<dyn Backend>,
}

impl Client {
    /// Create a new client with the default backend.
    ///
    /// Returns an error if eopkg is not installed.
    pub fn new() -> Result<Self> {
        let backend = EopkgBackend::new()?;
        Ok(Self {
            backend: Box::new(backend),
        })
    }

    /// Create a client driving an explicit eopkg binary path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Box::new(EopkgBackend::with_path(path)),
        }
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Check if eopkg responds.
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Whether a package is currently installed.
    pub fn is_installed(&self, name: &str) -> Result<bool> {
        self.backend.is_installed(name)
    }

    /// Install a single package and verify it converged.
    pub fn install(&self, name: &str) -> Result<()> {
        let output = self.backend.install(name)?;
        if !self.backend.is_installed(name)? {
            return Err(Error::InstallFailed {
                name: name.to_string(),
                output: output.combined(),
            });
        }
        Ok(())
    }

    /// Remove a single package and verify it converged.
    pub fn remove(&self, name: &str) -> Result<()> {
        let output = self.backend.remove(name)?;
        if self.backend.is_installed(name)? {
            return Err(Error::RemoveFailed {
                name: name.to_string(),
                output: output.combined(),
            });
        }
        Ok(())
    }

    /// Upgrade all installed packages.
    pub fn upgrade_all(&self) -> Result<()> {
        self.backend.upgrade_all()
    }

    /// Converge a whole request and report the aggregate outcome.
    pub fn reconcile(&self, request: &PackageRequest) -> Result<Outcome> {
        reconcile::reconcile(self.backend.as_ref(), request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ActionOutput;
    use std::sync::Mutex;

    /// Minimal backend where install takes effect but remove never does.
    struct StubBackend {
        installed: Mutex<Vec<String>>,
    }

    impl Backend for StubBackend {
        fn is_available(&self) -> bool {
            true
        }

        fn is_installed(&self, name: &str) -> Result<bool> {
            Ok(self.installed.lock().unwrap().iter().any(|n| n == name))
        }

        fn install(&self, name: &str) -> Result<ActionOutput> {
            self.installed.lock().unwrap().push(name.to_string());
            Ok(ActionOutput::default())
        }

        fn remove(&self, _name: &str) -> Result<ActionOutput> {
            Ok(ActionOutput {
                stdout: "nothing removed".to_string(),
                ..ActionOutput::default()
            })
        }

        fn upgrade_all(&self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_client_install_verifies() {
        let client = Client::with_backend(Box::new(StubBackend {
            installed: Mutex::new(Vec::new()),
        }));
        client.install("nano").unwrap();
        assert!(client.is_installed("nano").unwrap());
    }

    #[test]
    fn test_client_remove_surfaces_mismatch() {
        let client = Client::with_backend(Box::new(StubBackend {
            installed: Mutex::new(vec!["nano".to_string()]),
        }));
        let err = client.remove("nano").unwrap_err();
        assert!(matches!(err, Error::RemoveFailed { name, output }
            if name == "nano" && output == "nothing removed"));
    }

    #[test]
    fn test_client_reconcile_through_backend() {
        let client = Client::with_backend(Box::new(StubBackend {
            installed: Mutex::new(vec!["htop".to_string()]),
        }));
        let request = PackageRequest::new(["nano", "htop"], DesiredState::Present).unwrap();
        let outcome = client.reconcile(&request).unwrap();
        assert_eq!(outcome.changed_count, 1);
        assert_eq!(outcome.already_count, 1);
    }
}
