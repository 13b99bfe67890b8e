use super::Config;
use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

/// Checks configuration files for unknown keys and suspicious values
pub struct ConfigValidator {
    /// Set of valid configuration fields that are recognized by hashwatch
    known_fields: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        Self {
            known_fields: Config::keys().iter().copied().collect(),
        }
    }

    /// Validate a configuration file on disk and warn about unknown fields
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn validate_config_file(&self, config_path: &Path) -> Result<()> {
        if !config_path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(config_path)?;
        let parsed: toml::Value = toml::from_str(&content)?;

        let mut unknown_fields = Vec::new();
        self.check_table(&parsed, "", &mut unknown_fields);

        if !unknown_fields.is_empty() {
            eprintln!("{}", "Configuration warnings:".yellow().bold());
            for field in &unknown_fields {
                eprintln!("  Unknown configuration field: {}", field.yellow());
            }
            eprintln!();
        }

        Ok(())
    }

    /// Recursively collects dotted keys that hashwatch does not recognize
    fn check_table(&self, table: &toml::Value, prefix: &str, unknown: &mut Vec<String>) {
        if let toml::Value::Table(map) = table {
            for (key, value) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                if let toml::Value::Table(_) = value {
                    self.check_table(value, &full_key, unknown);
                } else if !self.known_fields.contains(full_key.as_str()) {
                    unknown.push(full_key);
                }
            }
        }
    }

    /// Returns human-readable warnings about values that load but probably
    /// do not do what the user intended
    #[must_use]
    pub fn value_warnings(config: &Config) -> Vec<String> {
        let mut warnings = Vec::new();

        for entry in &config.watch.exclude {
            if entry.is_empty() {
                warnings.push("Empty exclusion entry matches every path".to_string());
            } else if !looks_absolute(entry) {
                warnings.push(format!(
                    "Exclusion '{entry}' is relative and will never match an absolute path"
                ));
            }
        }

        if config.performance.chunk_size == 0 {
            warnings.push("performance.chunk_size is 0; the default of 4096 is used".to_string());
        }

        let root = config
            .watch
            .root
            .to_str()
            .and_then(|root| crate::utils::expand_tilde(root).ok())
            .unwrap_or_else(|| config.watch.root.clone());
        if !root.is_dir() {
            warnings.push(format!(
                "Watched root {} is not a directory; scans will be empty",
                config.watch.root.display()
            ));
        }

        warnings
    }

    /// Print value warnings to stderr
    pub fn warn_suspicious_values(config: &Config) {
        for warning in Self::value_warnings(config) {
            crate::output::warning(&format!("Warning: {warning}"));
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute on this platform, or a Windows drive path in the shared default list
fn looks_absolute(entry: &str) -> bool {
    Path::new(entry).is_absolute()
        || entry.starts_with('/')
        || entry.starts_with('\\')
        || entry.as_bytes().get(1) == Some(&b':')
}
