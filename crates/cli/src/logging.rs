//! Diagnostics on stderr.
//!
//! The engine logs through the `log` facade; the subscriber installed here
//! bridges those records into `tracing` so one `RUST_LOG` filter covers both.

use tracing_subscriber::EnvFilter;

/// Default directive for a given `-v` count, unless `RUST_LOG` is set.
pub const fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .try_init();
}
