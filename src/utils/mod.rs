//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - [`hash`]: Streaming SHA-256 fingerprints
//! - [`logging`]: `tracing` subscriber setup
//! - [`serialization`]: JSON encoding of the snapshot state
//! - [`thread_pool`]: Thread pool configuration
//!
//! # Examples
//!
//! ```
//! use hashwatch::utils::expand_tilde;
//!
//! # fn main() -> anyhow::Result<()> {
//! let path = expand_tilde("~/Downloads")?;
//! # Ok(())
//! # }
//! ```

/// Content fingerprinting
pub mod hash;
/// Diagnostic logging setup
pub mod logging;
/// Snapshot state encoding
pub mod serialization;
/// Thread pool configuration for parallel hashing
pub mod thread_pool;

use anyhow::Result;
use std::path::PathBuf;

/// Expands a path starting with `~` to the user's home directory.
///
/// # Errors
///
/// Returns an error if the path is empty.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path.is_empty() {
        anyhow::bail!("Path cannot be empty");
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return Ok(home);
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() -> Result<()> {
        let home = dirs::home_dir().unwrap_or_default();
        if home.as_os_str().is_empty() {
            return Ok(());
        }

        assert_eq!(expand_tilde("~/Downloads")?, home.join("Downloads"));
        assert_eq!(expand_tilde("~")?, home);
        assert_eq!(expand_tilde("/srv/data")?, PathBuf::from("/srv/data"));
        assert_eq!(expand_tilde("~user/x")?, PathBuf::from("~user/x"));
        Ok(())
    }

    #[test]
    fn test_expand_tilde_rejects_empty() {
        assert!(expand_tilde("").is_err());
    }
}
