//! Diagnostic logging
//!
//! Console output for the user goes through [`styling`](super::styling).
//! Diagnostics (skipped columns, HTTP status, timings) go through `tracing`
//! to stderr so they never interleave with tables on stdout.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("failed to set global subscriber: {0}")]
    SetSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Filter directive for a `-v` count: warn, debug, then trace
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber on stderr.
///
/// `RUST_LOG` overrides the level derived from `verbosity`.
pub fn init_logging(verbosity: u8) -> Result<(), LogError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init()?;

    Ok(())
}
