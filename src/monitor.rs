//! Run orchestration: load → scan → diff → report → save.
//!
//! The monitor owns the watch configuration and the snapshot store. The
//! new snapshot is saved at the end of every non-dry run, after the report
//! has been handed to the sink, whether or not the sink succeeded.

use crate::config::Config;
use crate::diff::{DiffReport, diff};
use crate::error::MonitorError;
use crate::scanner::{ExclusionList, ScanOutcome, ScanStats, Scanner};
use crate::storage::{Snapshot, SnapshotStore};
use crate::utils::hash::DEFAULT_CHUNK_SIZE;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, info_span, warn};

/// Consumer of diff reports (console, JSON, alerting pipe, tests).
pub trait ReportSink {
    /// Deliver one run's report.
    ///
    /// # Errors
    ///
    /// Returns an error if the report could not be delivered. The run still
    /// saves its snapshot and then returns this error.
    fn emit(&mut self, report: &DiffReport) -> Result<()>;
}

impl<F> ReportSink for F
where
    F: FnMut(&DiffReport) -> Result<()>,
{
    fn emit(&mut self, report: &DiffReport) -> Result<()> {
        self(report)
    }
}

/// Sink that keeps every report in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Reports in emission order
    pub reports: Vec<DiffReport>,
}

impl ReportSink for CollectingSink {
    fn emit(&mut self, report: &DiffReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}

/// Watched root and exclusion policy for one monitor.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Directory to scan
    pub root: PathBuf,
    /// Paths pruned from the scan
    pub exclusions: ExclusionList,
    /// Bytes read per hashing chunk
    pub chunk_size: usize,
}

impl WatchConfig {
    /// Watch `root` with the given exclusions and the default chunk size.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, exclusions: ExclusionList) -> Self {
        Self {
            root: root.into(),
            exclusions,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Build from the `[watch]` and `[performance]` sections.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.watch.root.clone(),
            exclusions: config.exclusion_list(),
            chunk_size: config.performance.chunk_size,
        }
    }
}

/// Per-run switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Report without saving the new snapshot
    pub dry_run: bool,
    /// Treat a corrupt state file as an empty baseline instead of failing
    pub reset_corrupt_state: bool,
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Changes since the previous snapshot
    pub report: DiffReport,
    /// Files in the new snapshot
    pub files: usize,
    /// Files that exist but could not be hashed this run
    pub unreadable: Vec<String>,
    /// Scan counters
    pub stats: ScanStats,
    /// Whether the new snapshot replaced the persisted one
    pub saved: bool,
}

/// Directory integrity monitor bound to one root and one state file.
#[derive(Debug, Clone)]
pub struct Monitor {
    config: WatchConfig,
    store: SnapshotStore,
}

impl Monitor {
    #[must_use]
    pub const fn new(config: WatchConfig, store: SnapshotStore) -> Self {
        Self { config, store }
    }

    #[must_use]
    pub const fn config(&self) -> &WatchConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Scan the watched root without touching persisted state.
    #[must_use]
    pub fn scan(&self) -> ScanOutcome {
        let outcome = Scanner::new(self.config.exclusions.clone())
            .with_chunk_size(self.config.chunk_size)
            .ignoring(self.store.path())
            .scan_detailed(&self.config.root);

        info!(
            hashed = outcome.stats.hashed,
            skipped = outcome.stats.skipped_files,
            excluded_dirs = outcome.stats.excluded_dirs,
            walk_errors = outcome.stats.walk_errors,
            "Scan complete"
        );
        outcome
    }

    /// Execute one full cycle and hand the report to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The previous snapshot is unreadable or corrupt (nothing is saved)
    /// - The new snapshot cannot be persisted (the run is unsaved)
    /// - The sink failed (returned after the snapshot was saved)
    pub fn run(&self, sink: &mut dyn ReportSink, options: RunOptions) -> Result<RunOutcome> {
        let span = info_span!("run", root = %self.config.root.display(), dry_run = options.dry_run);
        let _guard = span.enter();

        let previous = self.load_previous(options)?;
        let scan = self.scan();

        let mut report = diff(&previous, &scan.snapshot);
        if !scan.unreadable.is_empty() || !scan.unlisted.is_empty() {
            // Still on disk, just not readable right now
            let unreadable: HashSet<&str> = scan.unreadable.iter().map(String::as_str).collect();
            report.deleted.retain(|path| {
                !unreadable.contains(path.as_str())
                    && !scan
                        .unlisted
                        .iter()
                        .any(|dir| Path::new(path).starts_with(dir))
            });
        }

        info!(
            added = report.added.len(),
            deleted = report.deleted.len(),
            modified = report.modified.len(),
            "Diff computed"
        );

        let sink_result = sink.emit(&report);
        if let Err(e) = &sink_result {
            warn!(error = %e, "Report sink failed");
        }

        let saved = if options.dry_run {
            false
        } else {
            self.store.save(&scan.snapshot).with_context(|| {
                format!(
                    "Scan of {} completed but the new snapshot was NOT saved",
                    self.config.root.display()
                )
            })?;
            true
        };

        sink_result.context("Failed to emit diff report")?;

        Ok(RunOutcome {
            report,
            files: scan.snapshot.len(),
            unreadable: scan.unreadable,
            stats: scan.stats,
            saved,
        })
    }

    /// Scan and persist without reporting, establishing a new baseline.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn baseline(&self) -> Result<ScanOutcome> {
        let scan = self.scan();
        self.store
            .save(&scan.snapshot)
            .context("Failed to save baseline snapshot")?;
        Ok(scan)
    }

    fn load_previous(&self, options: RunOptions) -> Result<Snapshot> {
        match self.store.load() {
            Ok(snapshot) => Ok(snapshot),
            Err(e @ MonitorError::CorruptState { .. }) if options.reset_corrupt_state => {
                warn!(error = %e, "Discarding corrupt snapshot state, starting from an empty baseline");
                Ok(Snapshot::new())
            }
            Err(e) => Err(e).context("Failed to load previous snapshot"),
        }
    }
}
