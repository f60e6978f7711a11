//! The desired-state reconciler.
//!
//! Compares each requested package's current state against the desired state
//! and issues the minimal eopkg actions to converge them, strictly in request
//! order. The first post-action verification mismatch aborts the whole run:
//! packages after the failing one are never attempted and any accumulated
//! change count is discarded with the error.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{Action, DesiredState, Outcome, PackageRequest};

/// Process one request against a backend.
///
/// If the request asks for a bulk upgrade it runs first, unconditionally,
/// regardless of the desired state. Then exactly one of the install/remove
/// loops runs.
pub fn reconcile(backend: &dyn Backend, request: &PackageRequest) -> Result<Outcome> {
    if request.upgrade_all() {
        log::info!("updating installed packages");
        backend.upgrade_all()?;
    }

    match request.state() {
        DesiredState::Present => install_packages(backend, request.names()),
        DesiredState::Absent => remove_packages(backend, request.names()),
    }
}

/// Install every package not already present, verifying each one.
fn install_packages(backend: &dyn Backend, names: &[String]) -> Result<Outcome> {
    let mut installed = 0;

    for name in names {
        if backend.is_installed(name)? {
            log::debug!("{name} already installed, skipping");
            continue;
        }

        let output = backend.install(name)?;

        // The install exit code is not trusted; only the re-query counts.
        if !backend.is_installed(name)? {
            return Err(Error::InstallFailed {
                name: name.clone(),
                output: output.combined(),
            });
        }

        installed += 1;
    }

    Ok(Outcome {
        action: Action::Install,
        changed_count: installed,
        already_count: names.len() - installed,
    })
}

/// Remove every package currently present, verifying each one.
fn remove_packages(backend: &dyn Backend, names: &[String]) -> Result<Outcome> {
    let mut removed = 0;

    for name in names {
        if !backend.is_installed(name)? {
            log::debug!("{name} already absent, skipping");
            continue;
        }

        let output = backend.remove(name)?;

        if backend.is_installed(name)? {
            return Err(Error::RemoveFailed {
                name: name.clone(),
                output: output.combined(),
            });
        }

        removed += 1;
    }

    Ok(Outcome {
        action: Action::Remove,
        changed_count: removed,
        already_count: names.len() - removed,
    })
}
