#![allow(dead_code)]

use anyhow::Result;
use hashwatch::HashwatchContext;
use hashwatch::monitor::{Monitor, WatchConfig};
use hashwatch::scanner::ExclusionList;
use hashwatch::storage::SnapshotStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Watched directory plus state and config files in one temporary location
pub struct TestTree {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub state_path: PathBuf,
    pub config_path: PathBuf,
}

impl TestTree {
    /// Create an empty watched root
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("root");
        fs::create_dir_all(&root)?;

        Ok(Self {
            state_path: temp_dir.path().join("state/hashes.json"),
            config_path: temp_dir.path().join("config/config.toml"),
            root,
            temp_dir,
        })
    }

    /// Absolute path of `rel` under the watched root
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Snapshot key for `rel`
    pub fn key(&self, rel: &str) -> String {
        self.path(rel).to_string_lossy().into_owned()
    }

    /// Write `content` to `rel`, creating parent directories
    pub fn write(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn remove(&self, rel: &str) -> Result<()> {
        fs::remove_file(self.path(rel))?;
        Ok(())
    }

    /// Monitor over the root, excluding the given paths under it
    pub fn monitor(&self, excluded: &[&str]) -> Monitor {
        let exclusions = ExclusionList::new(excluded.iter().map(|rel| self.key(rel)));
        Monitor::new(
            WatchConfig::new(&self.root, exclusions),
            SnapshotStore::new(&self.state_path),
        )
    }

    /// Write a config watching the root with no exclusions, unless one exists
    pub fn write_config(&self) -> Result<()> {
        if self.config_path.exists() {
            return Ok(());
        }
        fs::create_dir_all(self.config_path.parent().unwrap_or(Path::new(".")))?;
        let root = self.root.to_string_lossy().replace('\\', "\\\\");
        fs::write(
            &self.config_path,
            format!("[watch]\nroot = \"{root}\"\nexclude = []\n"),
        )?;
        Ok(())
    }

    /// Context over this tree's config and state files
    pub fn context(&self) -> Result<HashwatchContext> {
        self.write_config()?;
        HashwatchContext::new_explicit(self.config_path.clone(), self.state_path.clone())
    }
}
