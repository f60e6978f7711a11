//! Core types for desired-state package reconciliation.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The end condition requested for a set of packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// Package should be installed
    Present,
    /// Package should not be installed
    Absent,
}

impl DesiredState {
    /// Parse a caller-supplied state string.
    ///
    /// Accepts the aliases of the original module contract:
    /// `installed` ≡ `present`, `removed` ≡ `absent`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "present" | "installed" => Some(DesiredState::Present),
            "absent" | "removed" => Some(DesiredState::Absent),
            _ => None,
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesiredState::Present => write!(f, "present"),
            DesiredState::Absent => write!(f, "absent"),
        }
    }
}

impl FromStr for DesiredState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown state: {s:?}"))
    }
}

/// Whether a package name is safe to hand to a subprocess.
///
/// eopkg package names are ASCII alphanumerics plus a few separators.
/// Anything with whitespace or shell metacharacters is rejected before a
/// command line is ever built from it.
pub fn is_valid_package_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.' | '_' | ':'))
}

/// A single reconciliation request: which packages, which end state, and
/// whether to bulk-upgrade everything first.
///
/// Immutable once built; validation happens at construction so the
/// reconciler never sees an unsafe name or an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    names: Vec<String>,
    state: DesiredState,
    upgrade_all: bool,
}

impl PackageRequest {
    /// Build a request, validating every package name.
    pub fn new(
        names: impl IntoIterator<Item = impl Into<String>>,
        state: DesiredState,
    ) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(Error::EmptyRequest);
        }
        for name in &names {
            if !is_valid_package_name(name) {
                return Err(Error::InvalidPackageName { name: name.clone() });
            }
        }
        Ok(Self {
            names,
            state,
            upgrade_all: false,
        })
    }

    /// Request a bulk upgrade of all installed packages before the
    /// install/remove dispatch.
    pub fn with_upgrade_all(mut self, upgrade_all: bool) -> Self {
        self.upgrade_all = upgrade_all;
        self
    }

    /// Package names, in request order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The requested end state.
    pub fn state(&self) -> DesiredState {
        self.state
    }

    /// Whether the bulk upgrade runs first.
    pub fn upgrade_all(&self) -> bool {
        self.upgrade_all
    }
}

/// The action a reconciliation run dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Packages were converged towards installed
    Install,
    /// Packages were converged towards absent
    Remove,
}

/// Aggregate result of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Which loop ran
    pub action: Action,
    /// Packages actually acted upon
    pub changed_count: usize,
    /// Packages that were already in the desired state
    pub already_count: usize,
}

impl Outcome {
    /// Whether anything changed (count > 0).
    pub fn changed(&self) -> bool {
        self.changed_count > 0
    }

    /// Human-readable summary in the shape callers expect.
    pub fn summary(&self) -> String {
        match (self.action, self.changed_count) {
            (Action::Install, 0) => "package(s) already present".to_string(),
            (Action::Install, n) => format!("installed {n} package(s)"),
            (Action::Remove, 0) => "package(s) already absent".to_string(),
            (Action::Remove, n) => format!("removed {n} package(s)"),
        }
    }
}
