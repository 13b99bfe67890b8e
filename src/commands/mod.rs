//! CLI command implementations.
//!
//! Each command takes a [`HashwatchContext`] and its parsed arguments. Report
//! text goes to stdout; status messages go through [`crate::output`].

pub mod baseline;
pub mod check;
pub mod config;
pub mod reset;
pub mod show;

use crate::HashwatchContext;
use crate::cli::ScanArgs;
use crate::monitor::WatchConfig;
use crate::scanner::ExclusionList;
use anyhow::Result;

/// Watch settings from the configuration with command-line overrides applied.
///
/// `--exclude` entries extend the configured list unless
/// `--no-default-excludes` was given, in which case they replace it.
///
/// # Errors
///
/// Returns an error if the root path is empty.
pub fn watch_config(ctx: &HashwatchContext, args: &ScanArgs) -> Result<WatchConfig> {
    let mut watch = ctx.watch_config()?;

    if let Some(root) = &args.root {
        watch.root = root.clone();
    }

    let mode = args.exclusion_mode.unwrap_or_else(|| watch.exclusions.mode());
    let configured = if args.no_default_excludes {
        Vec::new()
    } else {
        watch.exclusions.entries().to_vec()
    };
    watch.exclusions =
        ExclusionList::with_mode(configured.into_iter().chain(args.exclude.iter().cloned()), mode);

    Ok(watch)
}
