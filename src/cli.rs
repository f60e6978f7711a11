use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use eopkgkit::DesiredState;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eopkgctl")]
#[command(version)]
#[command(about = "Desired-state package management for Solus via eopkg", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Converge packages to a desired state (install or remove as needed)
    Apply(ApplyArgs),

    /// Show which of the named packages are currently installed
    Status(StatusArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Package name(s) to converge, processed in order
    #[arg(required = true, value_name = "PACKAGE")]
    pub name: Vec<String>,

    /// Desired end state for the packages
    #[arg(short, long, value_enum, default_value_t = StateArg::Present)]
    pub state: StateArg,

    /// Update all installed packages before converging
    #[arg(long)]
    pub upgrade_all: bool,

    /// Explicit path to the eopkg binary (skips discovery)
    #[arg(long, env = "EOPKG_PATH", value_name = "PATH")]
    pub eopkg_bin: Option<PathBuf>,

    /// Emit a single machine-readable JSON report on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Package name(s) to query
    #[arg(required = true, value_name = "PACKAGE")]
    pub name: Vec<String>,

    /// Explicit path to the eopkg binary (skips discovery)
    #[arg(long, env = "EOPKG_PATH", value_name = "PATH")]
    pub eopkg_bin: Option<PathBuf>,

    /// Emit a JSON map of package name to installed state
    #[arg(long)]
    pub json: bool,
}

/// Caller-facing state values, including the aliases of the original
/// module contract (installed ≡ present, removed ≡ absent).
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Present,
    Installed,
    Absent,
    Removed,
}

impl From<StateArg> for DesiredState {
    fn from(value: StateArg) -> Self {
        match value {
            StateArg::Present | StateArg::Installed => DesiredState::Present,
            StateArg::Absent | StateArg::Removed => DesiredState::Absent,
        }
    }
}
