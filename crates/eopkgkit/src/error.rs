//! Error types for eopkg operations.
//!
//! Every fatal condition of a reconciliation run maps onto one variant here.
//! Presence-query failures are intentionally absent: a query that exits
//! non-zero (or whose output lacks the installed marker) is reported as
//! "not installed" by the backend, never as an error.

use thiserror::Error;

/// Errors that can occur during eopkg operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The eopkg executable could not be located.
    #[error("eopkg not found. Is this a Solus system?")]
    EopkgNotFound,

    /// `eopkg upgrade -y` exited non-zero.
    #[error("could not update installed packages: {output}")]
    UpgradeFailed {
        /// Captured output from the failed upgrade
        output: String,
    },

    /// A package was still reported absent after its install command ran.
    #[error("failed to install {name}: {output}")]
    InstallFailed {
        /// Name of the package that did not converge
        name: String,
        /// Captured output from the install command
        output: String,
    },

    /// A package was still reported installed after its remove command ran.
    #[error("failed to remove {name}: {output}")]
    RemoveFailed {
        /// Name of the package that did not converge
        name: String,
        /// Captured output from the remove command
        output: String,
    },

    /// A package name failed shell-safety validation.
    #[error("invalid package name: {name:?}")]
    InvalidPackageName {
        /// The rejected name
        name: String,
    },

    /// A request was built with no package names.
    #[error("at least one package name is required")]
    EmptyRequest,

    /// A subprocess could not be executed at all.
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output, if any was captured
        stderr: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for eopkg operations.
pub type Result<T> = std::result::Result<T, Error>;
