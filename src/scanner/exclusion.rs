use serde::{Deserialize, Serialize};
use std::path::Path;

/// How exclusion entries are matched against candidate paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionMode {
    /// Plain string prefix: `/var/lib` also excludes `/var/libfoo`.
    #[default]
    Prefix,
    /// Leading path components: `/var/lib` excludes `/var/lib/x` but not `/var/libfoo`.
    Component,
}

/// Ordered set of excluded path prefixes.
///
/// Matching is a plain string-prefix test unless the list was built with
/// [`ExclusionMode::Component`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    entries: Vec<String>,
    mode: ExclusionMode,
}

impl ExclusionList {
    /// Prefix-mode list from the given entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_mode(entries, ExclusionMode::Prefix)
    }

    /// List from the given entries, matched with `mode`.
    pub fn with_mode<I, S>(entries: I, mode: ExclusionMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self {
            entries: Vec::new(),
            mode,
        };
        for entry in entries {
            list.push(entry);
        }
        list
    }

    /// Append an entry; duplicates are ignored so the list stays a set.
    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        if !self.entries.contains(&entry) {
            self.entries.push(entry);
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub const fn mode(&self) -> ExclusionMode {
        self.mode
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `path` falls under any entry.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.matching_entry(path).is_some()
    }

    /// First entry that excludes `path`, if any.
    #[must_use]
    pub fn matching_entry(&self, path: &Path) -> Option<&str> {
        let found = match self.mode {
            ExclusionMode::Prefix => {
                let path = path.to_string_lossy();
                self.entries
                    .iter()
                    .find(|entry| path.starts_with(entry.as_str()))
            }
            ExclusionMode::Component => self
                .entries
                .iter()
                .find(|entry| path.starts_with(Path::new(entry.as_str()))),
        };
        found.map(String::as_str)
    }
}
