//! Real eopkg CLI backend.
//!
//! Shells out to the `eopkg` binary with argument-array invocation. The
//! presence check scrapes the human-readable `eopkg info` output for its
//! "Installed package" marker; that textual contract is inherited from the
//! wrapped tool and isolated to this module.

use crate::backend::{ActionOutput, Backend};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Case-sensitive marker printed by `eopkg info` for installed packages.
const INSTALLED_MARKER: &str = "Installed package";

/// Conventional location checked before falling back to a PATH lookup.
const SYSTEM_BIN: &str = "/usr/bin/eopkg";

/// Backend that executes real `eopkg` commands.
pub struct EopkgBackend {
    /// Resolved path to the eopkg executable
    eopkg_path: PathBuf,
}

impl EopkgBackend {
    /// Create a backend, discovering the eopkg binary.
    ///
    /// Returns [`Error::EopkgNotFound`] if no executable can be located.
    pub fn new() -> Result<Self> {
        let eopkg_path = find_eopkg()?;
        Ok(Self { eopkg_path })
    }

    /// Create a backend with an explicit binary path.
    ///
    /// Skips discovery entirely; the path is trusted as-is. This is how the
    /// CLI's `--eopkg-bin` override and the fake-binary tests inject a path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            eopkg_path: path.into(),
        }
    }

    /// Path to the resolved binary.
    pub fn path(&self) -> &Path {
        &self.eopkg_path
    }

    /// Run an eopkg command and return raw output.
    fn run_eopkg(&self, args: &[&str]) -> Result<Output> {
        log::debug!("running {} {}", self.eopkg_path.display(), args.join(" "));
        let output = Command::new(&self.eopkg_path)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed {
                message: format!("failed to execute eopkg: {e}"),
                stderr: String::new(),
            })?;
        Ok(output)
    }

    /// Run a mutating eopkg command, capturing output without judging the
    /// exit status.
    fn run_action(&self, args: &[&str]) -> Result<ActionOutput> {
        let output = self.run_eopkg(args)?;
        Ok(ActionOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

impl Backend for EopkgBackend {
    fn is_available(&self) -> bool {
        self.run_eopkg(&["--version"])
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn is_installed(&self, name: &str) -> Result<bool> {
        let output = self.run_eopkg(&["info", name])?;
        if !output.status.success() {
            return Ok(false);
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.contains(INSTALLED_MARKER))
    }

    fn install(&self, name: &str) -> Result<ActionOutput> {
        self.run_action(&["install", name, "-y"])
    }

    fn remove(&self, name: &str) -> Result<ActionOutput> {
        self.run_action(&["remove", name, "-y"])
    }

    fn upgrade_all(&self) -> Result<()> {
        let output = self.run_action(&["upgrade", "-y"])?;
        if !output.success {
            return Err(Error::UpgradeFailed {
                output: output.combined(),
            });
        }
        Ok(())
    }
}

/// Find the eopkg executable path.
fn find_eopkg() -> Result<PathBuf> {
    // The conventional Solus location
    if Path::new(SYSTEM_BIN).exists() {
        return Ok(PathBuf::from(SYSTEM_BIN));
    }

    // Try which
    let output = Command::new("which")
        .arg("eopkg")
        .output()
        .map_err(|_| Error::EopkgNotFound)?;

    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    Err(Error::EopkgNotFound)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// Write an executable fake eopkg script and return its backend.
    ///
    /// The script treats any package listed in the `installed` file next to
    /// it as installed, and mutates that file on install/remove, mimicking
    /// the subcommand surface the backend drives.
    fn fake_eopkg(dir: &TempDir, upgrade_fails: bool) -> EopkgBackend {
        let bin = dir.path().join("eopkg");
        let db = dir.path().join("installed");
        fs::write(&db, "").unwrap();

        let script = format!(
            r#"#!/bin/sh
db="{db}"
cmd="$1"
case "$cmd" in
  --version) echo "eopkg 3.2"; exit 0 ;;
  info)
    if grep -qx "$2" "$db"; then echo "Installed package:"; else echo "Package $2 not found"; fi
    exit 0 ;;
  install)
    [ "$3" = "-y" ] || exit 2
    case "$2" in
      broken-*) echo "error fetching $2"; exit 1 ;;
      *) echo "$2" >> "$db"; echo "Installed $2"; exit 0 ;;
    esac ;;
  remove)
    [ "$3" = "-y" ] || exit 2
    case "$2" in
      stuck-*) echo "cannot remove $2"; exit 0 ;;
      *) grep -vx "$2" "$db" > "$db.tmp"; mv "$db.tmp" "$db"; echo "Removed $2"; exit 0 ;;
    esac ;;
  upgrade)
    {upgrade_body}
    ;;
  *) exit 2 ;;
esac
"#,
            db = db.display(),
            upgrade_body = if upgrade_fails {
                r#"echo "repository unreachable" >&2; exit 1"#
            } else {
                r#"echo "Upgraded 0 packages"; exit 0"#
            },
        );

        fs::write(&bin, script).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
        EopkgBackend::with_path(&bin)
    }

    #[test]
    fn test_is_available() {
        let dir = TempDir::new().unwrap();
        let backend = fake_eopkg(&dir, false);
        assert!(backend.is_available());
    }

    #[test]
    fn test_query_absent_then_install_then_present() {
        let dir = TempDir::new().unwrap();
        let backend = fake_eopkg(&dir, false);

        assert!(!backend.is_installed("nano").unwrap());
        let out = backend.install("nano").unwrap();
        assert!(out.success);
        assert!(backend.is_installed("nano").unwrap());
    }

    #[test]
    fn test_remove_clears_installed_state() {
        let dir = TempDir::new().unwrap();
        let backend = fake_eopkg(&dir, false);

        backend.install("nano").unwrap();
        let out = backend.remove("nano").unwrap();
        assert!(out.success);
        assert!(!backend.is_installed("nano").unwrap());
    }

    #[test]
    fn test_failed_install_is_not_a_backend_error() {
        let dir = TempDir::new().unwrap();
        let backend = fake_eopkg(&dir, false);

        // Non-zero exit still yields captured output, not Err
        let out = backend.install("broken-pkg").unwrap();
        assert!(!out.success);
        assert!(out.combined().contains("broken-pkg"));
        assert!(!backend.is_installed("broken-pkg").unwrap());
    }

    #[test]
    fn test_upgrade_all_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let backend = fake_eopkg(&dir, true);

        let err = backend.upgrade_all().unwrap_err();
        assert!(matches!(err, Error::UpgradeFailed { .. }));
        assert!(err.to_string().contains("repository unreachable"));
    }

    #[test]
    fn test_missing_binary_query_is_spawn_error() {
        let backend = EopkgBackend::with_path("/nonexistent/eopkg");
        assert!(!backend.is_available());
        assert!(matches!(
            backend.is_installed("nano"),
            Err(Error::CommandFailed { .. })
        ));
    }
}
