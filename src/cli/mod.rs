//! Command-line surface
//!
//! Argument parsing lives here; [commands] maps each parsed command onto
//! the library so the handlers can be exercised without a process.

pub mod commands;

use crate::domain::Scheme;
use clap::{Parser, Subcommand};

pub use commands::run;

#[derive(Debug, Parser)]
#[command(
    name = "flowrel",
    about = "Git Flow releases and hotfixes with CalVer or SemVer tags",
    disable_version_flag = true
)]
pub struct Cli {
    #[arg(long, global = true, help = "Print the git operations instead of running them")]
    pub dry_run: bool,

    #[arg(short, long, global = true, help = "Show each step as it runs")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Commands {
    /// Start or finish a release
    Release {
        #[command(subcommand)]
        action: ReleaseAction,
    },

    /// Start or finish a hotfix
    Hotfix {
        #[command(subcommand)]
        action: HotfixAction,
    },

    /// Write a .flowrel.toml in the current directory
    Init {
        #[arg(long, default_value = "calver", help = "Versioning scheme: calver or semver")]
        scheme: Scheme,

        #[arg(long, help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Print version information
    Version,

    /// Show releases and hotfixes in progress
    Status,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum ReleaseAction {
    /// Create release/<next version> from develop
    Start,

    /// Merge the release to main and develop, tag and push
    Finish {
        #[arg(long, help = "Start the next release once this one is finished")]
        start_new: bool,
    },
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum HotfixAction {
    /// Create hotfix/<next version> from main
    Start,

    /// Merge the hotfix to main and develop, tag and push
    Finish,
}
