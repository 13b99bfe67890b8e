#![warn(missing_docs)]

//! # Hashwatch - Directory Integrity Monitor
//!
//! Hashwatch fingerprints every regular file under a root directory with
//! SHA-256, compares the result with the snapshot saved by the previous run,
//! and reports which files were added, deleted or modified.
//!
//! ## Architecture
//!
//! - [`utils::hash`]: streaming SHA-256 fingerprints
//! - [`scanner`]: recursive walk with prefix exclusions that prune whole subtrees
//! - [`storage`]: snapshot type and the JSON state file with atomic replacement
//! - [`diff`]: added / deleted / modified classification
//! - [`monitor`]: one load → scan → diff → report → save cycle
//! - [`output`]: console and JSON report sinks
//! - [`commands`]: CLI command implementations
//!
//! ## Example Usage
//!
//! ```no_run
//! use hashwatch::monitor::{CollectingSink, Monitor, RunOptions, WatchConfig};
//! use hashwatch::scanner::ExclusionList;
//! use hashwatch::storage::SnapshotStore;
//!
//! # fn main() -> anyhow::Result<()> {
//! let monitor = Monitor::new(
//!     WatchConfig::new("/srv/data", ExclusionList::new(["/srv/data/cache"])),
//!     SnapshotStore::new("/var/tmp/hashes.json"),
//! );
//!
//! let mut sink = CollectingSink::default();
//! let outcome = monitor.run(&mut sink, RunOptions::default())?;
//! println!("{} files changed", outcome.report.total());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Command implementations.
pub mod commands;

/// Configuration loading, editing and validation.
pub mod config;

/// Snapshot comparison.
pub mod diff;

/// Error taxonomy for scanning and persistence.
pub mod error;

/// Scan → diff → report → save orchestration.
pub mod monitor;

/// Console output and report sinks.
pub mod output;

/// Filesystem walk and exclusion matching.
pub mod scanner;

/// Snapshot model and state file persistence.
pub mod storage;

/// Utility functions and helpers.
pub mod utils;

use anyhow::{Context, Result};
use monitor::{Monitor, WatchConfig};
use std::path::PathBuf;
use storage::SnapshotStore;

/// Current version of the hashwatch binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to the user config directory.
pub const DEFAULT_CONFIG_PATH: &str = "hashwatch/config.toml";

/// Overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "HASHWATCH_CONFIG_PATH";

/// Overrides `state.path` from the configuration.
pub const STATE_PATH_ENV: &str = "HASHWATCH_STATE_PATH";

/// Central context for all hashwatch commands.
///
/// Holds the configuration and where it came from, plus the resolved
/// location of the snapshot state file.
///
/// # Examples
///
/// ```no_run
/// use hashwatch::HashwatchContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Default paths, honoring HASHWATCH_CONFIG_PATH and HASHWATCH_STATE_PATH
/// let ctx = HashwatchContext::new()?;
///
/// // Explicit paths (for testing)
/// let ctx = HashwatchContext::new_explicit(
///     "/tmp/hw/config.toml".into(),
///     "/tmp/hw/hashes.json".into(),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HashwatchContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Path to the snapshot state file.
    pub state_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl HashwatchContext {
    /// Creates a context from the default or environment-provided paths.
    ///
    /// A missing configuration file is created with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or if
    /// the configuration file cannot be read, parsed or created.
    pub fn new() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            PathBuf::from(path)
        } else {
            let dir = dirs::config_dir().context("Could not find config directory")?;
            dir.join(DEFAULT_CONFIG_PATH)
        };

        let config = config::Config::load(&config_path)?;

        let state_path = if let Ok(path) = std::env::var(STATE_PATH_ENV) {
            PathBuf::from(path)
        } else {
            resolve_path(&config.state.path)?
        };

        let validator = config::validator::ConfigValidator::new();
        if let Err(e) = validator.validate_config_file(&config_path) {
            output::warning(&format!("Warning: Configuration validation failed: {e}"));
        }
        config::validator::ConfigValidator::warn_suspicious_values(&config);

        if let Err(e) = utils::thread_pool::configure_from_config(&config) {
            output::warning(&format!("Warning: Failed to configure thread pool: {e}"));
        }

        Ok(Self {
            config_path,
            state_path,
            config,
        })
    }

    /// Creates a context with explicit paths, bypassing the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(config_path: PathBuf, state_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)?;
        Ok(Self {
            config_path,
            state_path,
            config,
        })
    }

    /// Store for the resolved state file.
    #[must_use]
    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.state_path)
    }

    /// Watch settings from the configuration, with `~` expanded in the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured root is empty.
    pub fn watch_config(&self) -> Result<WatchConfig> {
        let mut watch = WatchConfig::from_config(&self.config);
        watch.root = resolve_path(&watch.root)?;
        Ok(watch)
    }

    /// Monitor over `watch` that persists to this context's state file.
    #[must_use]
    pub fn monitor(&self, watch: WatchConfig) -> Monitor {
        Monitor::new(watch, self.store())
    }
}

/// Expand a leading `~` in a configured path.
fn resolve_path(path: &std::path::Path) -> Result<PathBuf> {
    match path.to_str() {
        Some(s) => utils::expand_tilde(s),
        None => Ok(path.to_path_buf()),
    }
}
