/// Exclusion policy (string-prefix or path-component matching).
pub mod exclusion;

/// Directory traversal and per-file hashing into a snapshot.
pub mod walk;

pub use exclusion::{ExclusionList, ExclusionMode};
pub use walk::{ScanOutcome, ScanStats, Scanner, scan};
