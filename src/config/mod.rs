pub mod validator;

use crate::scanner::{ExclusionList, ExclusionMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// System locations skipped by default, for both Windows and Unix hosts.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "C:\\Windows",
    "C:\\Program Files",
    "C:\\Program Files (x86)",
    "C:\\ProgramData",
    "C:\\$Recycle.Bin",
    "/proc",
    "/sys",
    "/dev",
    "/run",
    "/tmp",
    "/var/lib",
    "/var/run",
];

/// Name of the persisted snapshot file.
pub const DEFAULT_STATE_FILE: &str = "hashes.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub state: StateConfig,

    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// What to scan and what to leave out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSection {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_exclusions")]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub exclusion_mode: ExclusionMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Hashing worker threads (0 = automatic)
    #[serde(default)]
    pub parallel_threads: usize,
    /// Bytes read per chunk while hashing
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclusions(),
            exclusion_mode: ExclusionMode::Prefix,
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threads: 0,
            chunk_size: default_chunk_size(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read the configuration file
    /// - Configuration file contains invalid TOML
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            // Create default config if it doesn't exist
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Exclusion list built from `watch.exclude` and `watch.exclusion_mode`
    #[must_use]
    pub fn exclusion_list(&self) -> ExclusionList {
        ExclusionList::with_mode(self.watch.exclude.iter().cloned(), self.watch.exclusion_mode)
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return None;
        }

        match (parts[0], parts[1]) {
            ("watch", "root") => Some(self.watch.root.display().to_string()),
            ("watch", "exclude") => Some(self.watch.exclude.join(",")),
            ("watch", "exclusion_mode") => {
                Some(format!("{:?}", self.watch.exclusion_mode).to_lowercase())
            }
            ("state", "path") => Some(self.state.path.display().to_string()),
            ("performance", "parallel_threads") => {
                Some(self.performance.parallel_threads.to_string())
            }
            ("performance", "chunk_size") => Some(self.performance.chunk_size.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `watch.exclude` takes a comma-separated list and replaces the current one.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    /// - The value is invalid for the key
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(anyhow::anyhow!("Invalid configuration key: {key}"));
        }

        match (parts[0], parts[1]) {
            ("watch", "root") => self.watch.root = PathBuf::from(value),
            ("watch", "exclude") => {
                self.watch.exclude = value
                    .split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            ("watch", "exclusion_mode") => {
                self.watch.exclusion_mode = match value.to_lowercase().as_str() {
                    "prefix" => ExclusionMode::Prefix,
                    "component" => ExclusionMode::Component,
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Invalid exclusion mode: {value} (expected 'prefix' or 'component')"
                        ));
                    }
                };
            }
            ("state", "path") => self.state.path = PathBuf::from(value),
            ("performance", "parallel_threads") => {
                self.performance.parallel_threads = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            ("performance", "chunk_size") => {
                let size: usize = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
                if size == 0 {
                    return Err(anyhow::anyhow!("Chunk size must be greater than zero"));
                }
                self.performance.chunk_size = size;
            }
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {key}")),
        }
        Ok(())
    }

    /// Reset a configuration value to its default
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(anyhow::anyhow!("Invalid configuration key: {key}"));
        }

        match (parts[0], parts[1]) {
            ("watch", "root") => self.watch.root = default_root(),
            ("watch", "exclude") => self.watch.exclude = default_exclusions(),
            ("watch", "exclusion_mode") => self.watch.exclusion_mode = ExclusionMode::Prefix,
            ("state", "path") => self.state.path = default_state_path(),
            ("performance", "parallel_threads") => self.performance.parallel_threads = 0,
            ("performance", "chunk_size") => self.performance.chunk_size = default_chunk_size(),
            _ => return Err(anyhow::anyhow!("Cannot unset configuration key: {key}")),
        }
        Ok(())
    }

    /// All keys accepted by `get`/`set`, in display order
    #[must_use]
    pub const fn keys() -> &'static [&'static str] {
        &[
            "watch.root",
            "watch.exclude",
            "watch.exclusion_mode",
            "state.path",
            "performance.parallel_threads",
            "performance.chunk_size",
        ]
    }
}

// Default functions for serde
fn default_root() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_exclusions() -> Vec<String> {
    DEFAULT_EXCLUSIONS.iter().map(|s| (*s).to_string()).collect()
}

fn default_state_path() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from(DEFAULT_STATE_FILE),
        |dir| dir.join("hashwatch").join(DEFAULT_STATE_FILE),
    )
}

const fn default_chunk_size() -> usize {
    crate::utils::hash::DEFAULT_CHUNK_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_creates_default_config() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("hashwatch/config.toml");

        let config = Config::load(&path)?;
        assert!(path.exists());
        assert_eq!(config.watch.exclude.len(), DEFAULT_EXCLUSIONS.len());
        assert_eq!(config.watch.exclusion_mode, ExclusionMode::Prefix);
        assert_eq!(config.performance.chunk_size, 4096);
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.watch.root = PathBuf::from("/srv/data");
        config.watch.exclude = vec!["/srv/data/cache".to_string()];
        config.watch.exclusion_mode = ExclusionMode::Component;
        config.save(&path)?;

        let loaded = Config::load(&path)?;
        assert_eq!(loaded.watch.root, PathBuf::from("/srv/data"));
        assert_eq!(loaded.watch.exclude, vec!["/srv/data/cache"]);
        assert_eq!(loaded.watch.exclusion_mode, ExclusionMode::Component);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[watch]\nroot = \"/data\"\n")?;

        let config = Config::load(&path)?;
        assert_eq!(config.watch.root, PathBuf::from("/data"));
        assert_eq!(config.watch.exclude, default_exclusions());
        assert_eq!(config.performance.parallel_threads, 0);
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[watch\nroot = ")?;

        assert!(Config::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_get_set_round_trip() -> Result<()> {
        let mut config = Config::default();

        config.set("watch.root", "/data".to_string())?;
        config.set("watch.exclude", "/data/a, /data/b,".to_string())?;
        config.set("watch.exclusion_mode", "component".to_string())?;
        config.set("performance.chunk_size", "65536".to_string())?;

        assert_eq!(config.get("watch.root").as_deref(), Some("/data"));
        assert_eq!(config.get("watch.exclude").as_deref(), Some("/data/a,/data/b"));
        assert_eq!(config.get("watch.exclusion_mode").as_deref(), Some("component"));
        assert_eq!(config.get("performance.chunk_size").as_deref(), Some("65536"));
        assert!(config.get("nope.nope").is_none());
        Ok(())
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("performance.chunk_size", "0".to_string()).is_err());
        assert!(config.set("performance.parallel_threads", "many".to_string()).is_err());
        assert!(config.set("watch.exclusion_mode", "glob".to_string()).is_err());
        assert!(config.set("watch", "x".to_string()).is_err());
        assert!(config.set("core.repo_path", "x".to_string()).is_err());
    }

    #[test]
    fn test_unset_restores_default() -> Result<()> {
        let mut config = Config::default();
        config.set("watch.exclude", "/only".to_string())?;
        config.unset("watch.exclude")?;
        assert_eq!(config.watch.exclude, default_exclusions());
        assert!(config.unset("bogus.key").is_err());
        Ok(())
    }

    #[test]
    fn test_exclusion_list_uses_mode() {
        let mut config = Config::default();
        config.watch.exclude = vec!["/var/lib".to_string()];
        config.watch.exclusion_mode = ExclusionMode::Component;

        let list = config.exclusion_list();
        assert_eq!(list.mode(), ExclusionMode::Component);
        assert!(!list.is_excluded(Path::new("/var/libfoo")));
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = Config::default();
        for key in Config::keys() {
            assert!(config.get(key).is_some(), "missing getter for {key}");
        }
    }
}
