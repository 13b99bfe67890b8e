/// Durable snapshot storage (JSON state file, atomic replace)
pub mod snapshots;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use snapshots::SnapshotStore;

/// Length of a hex-encoded SHA-256 digest.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// SHA-256 content digest of a file, held as lowercase hex.
///
/// Two files with equal fingerprints are treated as content-identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Builds a fingerprint from a finished SHA-256 digest.
    #[must_use]
    pub fn from_digest(digest: &impl fmt::LowerHex) -> Self {
        Self(format!("{digest:x}"))
    }

    /// Parses a canonical (64 char, lowercase hex) fingerprint.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the string has the wrong
    /// length or contains anything other than `0-9a-f`.
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        if hex.len() != FINGERPRINT_HEX_LEN {
            return Err(format!(
                "fingerprint must be {FINGERPRINT_HEX_LEN} hex characters, got {}",
                hex.len()
            ));
        }
        if !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(format!("fingerprint is not lowercase hex: {hex}"));
        }
        Ok(Self(hex.to_string()))
    }

    /// Returns the hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first `len` hex characters, for compact display.
    #[must_use]
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Fingerprint> for String {
    fn from(value: Fingerprint) -> Self {
        value.0
    }
}

/// Mapping from absolute file path to content fingerprint at one point in time.
///
/// Iteration follows insertion order (walk order for scanned snapshots, file
/// order for loaded ones). Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: IndexMap<String, Fingerprint>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty snapshot with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Records `fingerprint` for `path`, returning the previous value if any.
    pub fn insert(&mut self, path: impl Into<String>, fingerprint: Fingerprint) -> Option<Fingerprint> {
        self.entries.insert(path.into(), fingerprint)
    }

    /// Fingerprint recorded for `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Fingerprint> {
        self.entries.get(path)
    }

    /// Whether `path` has an entry.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of files in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(path, fingerprint)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fingerprint)> {
        self.entries.iter().map(|(path, fp)| (path.as_str(), fp))
    }

    /// Iterates paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Fingerprint)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, Fingerprint)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = (&'a String, &'a Fingerprint);
    type IntoIter = indexmap::map::Iter<'a, String, Fingerprint>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
