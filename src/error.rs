//! Error taxonomy for the scan → diff → persist cycle.
//!
//! Per-file and per-directory failures (`Io`, `Traversal`) are recovered
//! inside the scanner by skipping the offending entry. Store-level failures
//! (`CorruptState`, `Persist`) always surface to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the hasher, scanner and snapshot store.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be listed during traversal.
    #[error("failed to list directory {}: {source}", path.display())]
    Traversal {
        /// Directory (or entry) that failed
        path: PathBuf,
        /// Underlying walk error
        #[source]
        source: walkdir::Error,
    },

    /// The persisted snapshot exists but is not a valid path → fingerprint document.
    #[error("snapshot state {} is corrupt: {source}", path.display())]
    CorruptState {
        /// State file that failed to parse
        path: PathBuf,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },

    /// The new snapshot could not be written; the run's result is unsaved.
    #[error("failed to persist snapshot to {}: {source}", path.display())]
    Persist {
        /// Target state file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, MonitorError>;
