use crate::HashwatchContext;
use crate::cli::ScanArgs;
use crate::output;
use crate::scanner::ScanOutcome;
use anyhow::Result;

/// Scan the watched root and save the result as the new baseline
///
/// Whatever changed since the previous snapshot is accepted silently.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be saved
pub fn execute(ctx: &HashwatchContext, args: &ScanArgs) -> Result<ScanOutcome> {
    let watch = super::watch_config(ctx, args)?;
    output::info(&format!("[*] Recording baseline for {}...", watch.root.display()));

    let outcome = ctx.monitor(watch).baseline()?;

    if !outcome.unreadable.is_empty() {
        output::warning(&format!(
            "{} file(s) could not be read and were left out of the baseline",
            outcome.unreadable.len()
        ));
    }
    output::success(&format!(
        "Baseline of {} files saved to {}",
        outcome.snapshot.len(),
        ctx.state_path.display()
    ));

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_baseline_overwrites_previous_state() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("watched");
        fs::create_dir_all(&root)?;
        fs::write(root.join("a.txt"), "hello")?;

        let ctx = HashwatchContext::new_explicit(
            dir.path().join("config.toml"),
            dir.path().join("hashes.json"),
        )?;
        fs::write(&ctx.state_path, "not json")?;

        let args = ScanArgs {
            root: Some(root),
            no_default_excludes: true,
            ..ScanArgs::default()
        };
        let outcome = execute(&ctx, &args)?;

        assert_eq!(outcome.snapshot.len(), 1);
        assert_eq!(ctx.store().load()?, outcome.snapshot);
        Ok(())
    }
}
