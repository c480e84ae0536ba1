//! Logging configuration for sabersql.
//!
//! Logs always go to stderr; stdout carries only the client's query output
//! and command summaries.

use tracing_subscriber::EnvFilter;

/// Returns the filter directive used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Initializes logging to stderr.
///
/// `RUST_LOG` takes precedence over the `verbose` flag.
pub fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose))),
        )
        .with_writer(std::io::stderr)
        .init();
}
