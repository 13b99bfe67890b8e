use crate::HashwatchContext;
use crate::output;
use anyhow::{Context, Result};

/// Delete the saved snapshot so the next check reports every file as added
///
/// # Errors
///
/// Returns an error if the state file exists but cannot be removed
pub fn execute(ctx: &HashwatchContext) -> Result<()> {
    let removed = ctx
        .store()
        .reset()
        .with_context(|| format!("Failed to reset {}", ctx.state_path.display()))?;

    if removed {
        output::success(&format!("Removed snapshot state {}", ctx.state_path.display()));
    } else {
        output::info(&format!("No snapshot state at {}", ctx.state_path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reset_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let ctx = HashwatchContext::new_explicit(
            dir.path().join("config.toml"),
            dir.path().join("hashes.json"),
        )?;
        std::fs::write(&ctx.state_path, "{}\n")?;

        execute(&ctx)?;
        assert!(!ctx.state_path.exists());
        execute(&ctx)?;
        Ok(())
    }
}
