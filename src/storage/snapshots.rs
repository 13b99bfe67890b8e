use super::Snapshot;
use crate::error::{MonitorError, Result};
use crate::utils::serialization;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Loads and persists the path → fingerprint mapping between runs.
///
/// The state file is a JSON object keyed by absolute path. Saves go through
/// a temporary file in the same directory followed by a rename, so a crash
/// mid-write leaves the previous state intact.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store backed by the given state file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a persisted snapshot exists yet.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the persisted snapshot, or an empty one on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The state file exists but cannot be read (`Io`)
    /// - The state file is not a JSON object of path → fingerprint (`CorruptState`)
    pub fn load(&self) -> Result<Snapshot> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot state yet, starting empty");
                return Ok(Snapshot::new());
            }
            Err(source) => {
                return Err(MonitorError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let snapshot: Snapshot =
            serialization::deserialize(&data).map_err(|source| MonitorError::CorruptState {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), entries = snapshot.len(), "Loaded snapshot");
        Ok(snapshot)
    }

    /// Replace the persisted snapshot with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns `Persist` if:
    /// - The parent directory cannot be created
    /// - The temporary file cannot be written or synced
    /// - The temporary file cannot be renamed over the state file
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let data = serialization::serialize(snapshot)
            .map_err(|e| self.persist_error(io::Error::other(e)))?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| self.persist_error(e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| self.persist_error(e))?;
        temp.write_all(&data).map_err(|e| self.persist_error(e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| self.persist_error(e))?;
        temp.persist(&self.path)
            .map_err(|e| self.persist_error(e.error))?;

        debug!(path = %self.path.display(), entries = snapshot.len(), "Saved snapshot");
        Ok(())
    }

    /// Delete the persisted snapshot so the next run starts from an empty baseline.
    ///
    /// Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns `Persist` if the state file exists but cannot be removed.
    pub fn reset(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Removed snapshot state");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.persist_error(e)),
        }
    }

    fn persist_error(&self, source: io::Error) -> MonitorError {
        MonitorError::Persist {
            path: self.path.clone(),
            source,
        }
    }
}
