//! `tracing` subscriber initialization.
//!
//! Diagnostics go to stderr and are filtered by `HASHWATCH_LOG`
//! (`EnvFilter` syntax, e.g. `HASHWATCH_LOG=hashwatch::scanner=debug`).

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "HASHWATCH_LOG";

static INIT: Once = Once::new();

/// Filter used when `HASHWATCH_LOG` is unset or invalid.
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "hashwatch=debug" } else { "hashwatch=warn" }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // A subscriber installed by an embedding program wins
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .try_init();
    });
}
