//! Command-line interface definitions for hashwatch.
//!
//! The CLI definitions are shared between the main binary and build tools
//! (xtask) for man page generation.

#![allow(missing_docs)]

use crate::scanner::ExclusionMode;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for hashwatch.
#[derive(Parser)]
#[command(
    name = "hashwatch",
    version = crate::VERSION,
    about = "Directory integrity monitor",
    long_about = "Fingerprints every file under a directory with SHA-256 and reports \
                  files added, deleted or modified since the previous run"
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `check`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show verbose output and debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Scan, report changes since the last run and save the new snapshot
    Check(CheckArgs),

    /// Scan and save a snapshot without reporting changes
    Baseline(ScanArgs),

    /// Print the saved snapshot
    Show {
        /// Print the raw JSON state
        #[arg(long)]
        json: bool,
    },

    /// Delete the saved snapshot so the next check starts fresh
    Reset,

    /// Get and set configuration options
    Config {
        /// Configuration key (e.g. watch.root)
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// Reset the key to its default
        #[arg(long)]
        unset: bool,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Overrides for what gets scanned.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Directory to scan instead of `watch.root`
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Additional path prefix to exclude (repeatable)
    #[arg(short, long = "exclude", value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Replace the configured exclusions instead of extending them
    #[arg(long)]
    pub no_default_excludes: bool,

    /// How exclusions match paths
    #[arg(long, value_enum)]
    pub exclusion_mode: Option<ExclusionMode>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Report changes without saving the new snapshot
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Start from an empty baseline if the saved state is corrupt
    #[arg(long)]
    pub reset_corrupt_state: bool,

    /// Exit with status 2 when changes are detected
    #[arg(long)]
    pub exit_code: bool,
}
