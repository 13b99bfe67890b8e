use crate::HashwatchContext;
use crate::cli::CheckArgs;
use crate::monitor::{ReportSink, RunOptions, RunOutcome};
use crate::output::{self, ConsoleSink, JsonSink};
use anyhow::Result;

/// Execute one integrity check, printing the report to stdout
///
/// # Errors
///
/// Returns an error if:
/// - The saved snapshot cannot be read or is corrupt
/// - The new snapshot cannot be saved
/// - The report cannot be written
pub fn execute(ctx: &HashwatchContext, args: &CheckArgs) -> Result<RunOutcome> {
    if args.json {
        execute_with_sink(ctx, args, &mut JsonSink::stdout())
    } else {
        execute_with_sink(ctx, args, &mut ConsoleSink::stdout())
    }
}

/// Execute one integrity check, handing the report to `sink`
///
/// # Errors
///
/// See [`execute`].
pub fn execute_with_sink(
    ctx: &HashwatchContext,
    args: &CheckArgs,
    sink: &mut dyn ReportSink,
) -> Result<RunOutcome> {
    let watch = super::watch_config(ctx, &args.scan)?;
    let root = watch.root.clone();

    output::info("[*] Scanning for file changes...");
    output::verbose(&format!("Root: {}", root.display()));

    let options = RunOptions {
        dry_run: args.dry_run,
        reset_corrupt_state: args.reset_corrupt_state,
    };
    let outcome = ctx.monitor(watch).run(sink, options)?;

    if !outcome.unreadable.is_empty() {
        output::warning(&format!(
            "{} file(s) could not be read and were left out of the snapshot",
            outcome.unreadable.len()
        ));
        for path in &outcome.unreadable {
            output::verbose(&format!("  unreadable: {path}"));
        }
    }
    if outcome.stats.walk_errors > 0 {
        output::warning(&format!(
            "{} path(s) under {} could not be traversed",
            outcome.stats.walk_errors,
            root.display()
        ));
    }

    if outcome.saved {
        output::verbose(&format!(
            "Saved snapshot of {} files to {}",
            outcome.files,
            ctx.state_path.display()
        ));
    } else {
        output::info("Dry run: snapshot not saved");
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ScanArgs;
    use crate::monitor::CollectingSink;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_twice_reports_then_clean() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("watched");
        fs::create_dir_all(&root)?;
        fs::write(root.join("a.txt"), "hello")?;

        let ctx = HashwatchContext::new_explicit(
            dir.path().join("config.toml"),
            dir.path().join("state/hashes.json"),
        )?;
        let args = CheckArgs {
            scan: ScanArgs {
                root: Some(root),
                no_default_excludes: true,
                ..ScanArgs::default()
            },
            ..CheckArgs::default()
        };

        let mut sink = CollectingSink::default();
        let first = execute_with_sink(&ctx, &args, &mut sink)?;
        let second = execute_with_sink(&ctx, &args, &mut sink)?;

        assert_eq!(first.report.added.len(), 1);
        assert!(second.report.is_clean());
        assert_eq!(sink.reports.len(), 2);
        assert!(ctx.state_path.exists());
        Ok(())
    }
}
