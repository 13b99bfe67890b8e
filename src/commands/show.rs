use crate::HashwatchContext;
use crate::output;
use crate::storage::Snapshot;
use crate::utils::serialization;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

/// Fingerprint characters shown in the human-readable listing.
const SHORT_FINGERPRINT_LEN: usize = 12;

/// Print the saved snapshot
///
/// # Errors
///
/// Returns an error if:
/// - The state file cannot be read or is corrupt
/// - Writing to stdout fails
pub fn execute(ctx: &HashwatchContext, json: bool) -> Result<()> {
    let store = ctx.store();
    if !store.exists() {
        output::info(&format!("No snapshot saved at {}", store.path().display()));
        return Ok(());
    }

    let snapshot = store.load()?;
    let stdout = io::stdout();
    render(&snapshot, json, &mut stdout.lock())?;

    output::info(&format!(
        "{} files in {}",
        snapshot.len(),
        store.path().display()
    ));
    Ok(())
}

/// Write `snapshot` as the state-file JSON or as `fingerprint  path` lines
///
/// # Errors
///
/// Returns an error if serialization or writing fails
pub fn render<W: Write>(snapshot: &Snapshot, json: bool, out: &mut W) -> Result<()> {
    if json {
        let bytes = serialization::serialize(snapshot).context("Failed to serialize snapshot")?;
        out.write_all(&bytes)?;
    } else {
        for (path, fingerprint) in snapshot {
            writeln!(
                out,
                "{}  {}",
                fingerprint.short(SHORT_FINGERPRINT_LEN).yellow(),
                path
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
