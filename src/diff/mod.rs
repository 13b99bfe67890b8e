//! Snapshot comparison.
//!
//! Classifies every path of two snapshots into added, deleted or modified.
//! Only fingerprints are compared, so metadata-only changes (timestamps,
//! permissions) are invisible here.

use crate::storage::Snapshot;
use serde::{Deserialize, Serialize};

/// Paths that changed between two snapshots.
///
/// `added` and `modified` follow the new snapshot's order, `deleted` the old one's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// In the new snapshot only
    pub added: Vec<String>,
    /// In the old snapshot only
    pub deleted: Vec<String>,
    /// In both, with different fingerprints
    pub modified: Vec<String>,
}

impl DiffReport {
    /// True when nothing was added, deleted or modified.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    /// Number of changed paths across all three lists.
    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.deleted.len() + self.modified.len()
    }
}

/// Compare `old` against `new`.
#[must_use]
pub fn diff(old: &Snapshot, new: &Snapshot) -> DiffReport {
    let mut report = DiffReport::default();

    for (path, fingerprint) in new.iter() {
        match old.get(path) {
            None => report.added.push(path.to_string()),
            Some(previous) if previous != fingerprint => report.modified.push(path.to_string()),
            Some(_) => {}
        }
    }

    report.deleted = old
        .paths()
        .filter(|path| !new.contains(path))
        .map(str::to_string)
        .collect();

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hash::hash_bytes;

    fn snapshot(entries: &[(&str, &str)]) -> Snapshot {
        entries
            .iter()
            .map(|(path, content)| ((*path).to_string(), hash_bytes(content.as_bytes())))
            .collect()
    }

    #[test]
    fn test_empty_old_reports_everything_added() {
        let new = snapshot(&[("/r/a.txt", "hello"), ("/r/b.txt", "world")]);
        let report = diff(&Snapshot::new(), &new);

        assert_eq!(report.added, vec!["/r/a.txt", "/r/b.txt"]);
        assert!(report.deleted.is_empty());
        assert!(report.modified.is_empty());
    }

    #[test]
    fn test_identical_snapshots_are_clean() {
        let s = snapshot(&[("/r/a.txt", "hello"), ("/r/b.txt", "world")]);
        let report = diff(&s, &s.clone());

        assert!(report.is_clean());
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_classification() {
        let old = snapshot(&[
            ("/r/same", "1"),
            ("/r/changed", "2"),
            ("/r/gone", "3"),
        ]);
        let new = snapshot(&[
            ("/r/new", "4"),
            ("/r/changed", "22"),
            ("/r/same", "1"),
        ]);

        let report = diff(&old, &new);
        assert_eq!(report.added, vec!["/r/new"]);
        assert_eq!(report.modified, vec!["/r/changed"]);
        assert_eq!(report.deleted, vec!["/r/gone"]);
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_order_follows_source_snapshots() {
        let old = snapshot(&[("/z", "1"), ("/m", "1"), ("/a", "1")]);
        let new = snapshot(&[("/y", "1"), ("/b", "1"), ("/x", "1")]);

        let report = diff(&old, &new);
        assert_eq!(report.added, vec!["/y", "/b", "/x"]);
        assert_eq!(report.deleted, vec!["/z", "/m", "/a"]);
    }

    #[test]
    fn test_everything_deleted() {
        let old = snapshot(&[("/a", "1"), ("/b", "2")]);
        let report = diff(&old, &Snapshot::new());

        assert_eq!(report.deleted, vec!["/a", "/b"]);
        assert!(report.added.is_empty());
        assert!(report.modified.is_empty());
    }

    #[test]
    fn test_report_serializes_to_three_lists() -> anyhow::Result<()> {
        let report = diff(&Snapshot::new(), &snapshot(&[("/a", "1")]));
        let json = serde_json::to_value(&report)?;

        assert_eq!(json["added"], serde_json::json!(["/a"]));
        assert_eq!(json["deleted"], serde_json::json!([]));
        assert_eq!(json["modified"], serde_json::json!([]));
        Ok(())
    }
}
