//! Top-down directory scanner producing a [`Snapshot`].
//!
//! Traversal is single-threaded and prunes excluded directories before
//! descending into them. Hashing of the collected candidates is fanned out
//! over the rayon pool; results are gathered back in walk order so the
//! snapshot is identical regardless of thread count.

use crate::error::MonitorError;
use crate::scanner::ExclusionList;
use crate::storage::{Fingerprint, Snapshot};
use crate::utils::hash::{DEFAULT_CHUNK_SIZE, hash_file_with_chunk_size};
use crate::utils::thread_pool;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};
use walkdir::WalkDir;

/// Counters describing what a scan touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Files hashed into the snapshot
    pub hashed: usize,
    /// Regular files listed but not hashed (unreadable, vanished, excluded, non-UTF-8 path)
    pub skipped_files: usize,
    /// Directories pruned by the exclusion list
    pub excluded_dirs: usize,
    /// Entries the walk could not read (typically directories that cannot be listed)
    pub walk_errors: usize,
}

/// Full result of a scan: the snapshot plus what was left out of it.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Successfully hashed files
    pub snapshot: Snapshot,
    /// Regular files that were listed but could not be hashed
    pub unreadable: Vec<String>,
    /// Existing directories whose contents could not be listed
    pub unlisted: Vec<String>,
    /// Scan counters
    pub stats: ScanStats,
}

/// Walks a root directory and fingerprints every readable regular file.
#[derive(Debug, Clone)]
pub struct Scanner {
    exclusions: ExclusionList,
    chunk_size: usize,
    ignored: Vec<String>,
}

impl Scanner {
    /// Create a scanner honoring `exclusions`.
    #[must_use]
    pub const fn new(exclusions: ExclusionList) -> Self {
        Self {
            exclusions,
            chunk_size: DEFAULT_CHUNK_SIZE,
            ignored: Vec::new(),
        }
    }

    /// Override the hashing chunk size.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Never hash `path` (e.g. the state file living under the root).
    #[must_use]
    pub fn ignoring(mut self, path: &Path) -> Self {
        if let Some(key) = snapshot_key(path)
            && !self.ignored.contains(&key)
        {
            self.ignored.push(key);
        }
        self
    }

    /// The exclusion list in effect.
    #[must_use]
    pub const fn exclusions(&self) -> &ExclusionList {
        &self.exclusions
    }

    /// Scan `root` and return the snapshot of every hashable file.
    #[must_use]
    pub fn scan(&self, root: &Path) -> Snapshot {
        self.scan_detailed(root).snapshot
    }

    /// Scan `root`, also reporting skipped files and counters.
    ///
    /// Never fails: unreadable files and directories are left out of the
    /// snapshot and counted in the stats.
    #[must_use]
    pub fn scan_detailed(&self, root: &Path) -> ScanOutcome {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let span = info_span!("scan", root = %root.display());
        let _guard = span.enter();

        let (candidates, unlisted, mut stats) = self.collect_candidates(&root);

        let chunk_size = self.chunk_size;
        let hashed: Vec<(String, Result<Fingerprint, MonitorError>)> =
            thread_pool::run_in_pool(|| {
                candidates
                    .into_par_iter()
                    .map(|path| {
                        let result = hash_file_with_chunk_size(Path::new(&path), chunk_size);
                        (path, result)
                    })
                    .collect()
            });

        let mut snapshot = Snapshot::with_capacity(hashed.len());
        let mut unreadable = Vec::new();
        for (path, result) in hashed {
            match result {
                Ok(fingerprint) => {
                    snapshot.insert(path, fingerprint);
                }
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable file");
                    stats.skipped_files += 1;
                    unreadable.push(path);
                }
            }
        }
        stats.hashed = snapshot.len();

        ScanOutcome {
            snapshot,
            unreadable,
            unlisted,
            stats,
        }
    }

    /// Walk `root` and collect the regular, non-excluded files to hash,
    /// plus the existing directories that could not be listed
    fn collect_candidates(&self, root: &Path) -> (Vec<String>, Vec<String>, ScanStats) {
        let mut stats = ScanStats::default();
        let mut excluded_dirs = 0;
        let mut candidates = Vec::new();
        let mut unlisted = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return true;
                }
                match self.exclusions.matching_entry(entry.path()) {
                    Some(rule) => {
                        debug!(dir = %entry.path().display(), rule, "Pruning excluded directory");
                        excluded_dirs += 1;
                        false
                    }
                    None => true,
                }
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let vanished = source
                        .io_error()
                        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound);
                    if !vanished && let Some(dir) = source.path().and_then(Path::to_str) {
                        unlisted.push(dir.to_string());
                    }
                    let error = MonitorError::Traversal {
                        path: source
                            .path()
                            .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
                        source,
                    };
                    debug!(error = %error, "Skipping unreadable entry");
                    stats.walk_errors += 1;
                    continue;
                }
            };

            // Symlinks, sockets, devices and FIFOs are never hashed
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if self.exclusions.is_excluded(path) {
                debug!(file = %path.display(), "Skipping excluded file");
                stats.skipped_files += 1;
                continue;
            }

            match path.to_str() {
                Some(path) if self.ignored.iter().any(|ignored| ignored == path) => {
                    debug!(file = path, "Skipping ignored file");
                }
                Some(path) => candidates.push(path.to_string()),
                None => {
                    debug!(file = %path.display(), "Skipping non-UTF-8 path");
                    stats.skipped_files += 1;
                }
            }
        }

        stats.excluded_dirs = excluded_dirs;
        (candidates, unlisted, stats)
    }
}

/// Scan `root` with the given exclusions and default chunk size.
#[must_use]
pub fn scan(root: &Path, exclusions: &ExclusionList) -> Snapshot {
    Scanner::new(exclusions.clone()).scan(root)
}

/// Absolute form of `path` as used for snapshot keys.
#[must_use]
pub fn snapshot_key(path: &Path) -> Option<String> {
    std::path::absolute(path)
        .ok()
        .and_then(|p: PathBuf| p.to_str().map(str::to_string))
}
