//! Logging configuration using the tracing ecosystem.
//!
//! The library only emits events; this module installs the subscriber for
//! the command-line binary. Output goes to stderr so stdout stays clean for
//! issue output (and `--json`).

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "issuekit=warn";

/// Filter used with `--verbose`.
const VERBOSE_LOG_FILTER: &str = "issuekit=debug";

/// Initialize the logging system.
///
/// Configure via `RUST_LOG` environment variable:
/// - `RUST_LOG=issuekit=debug` - Log every request line and status
/// - `RUST_LOG=debug` - Also include reqwest/hyper internals
///
/// `RUST_LOG` takes precedence over `verbose`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let fallback = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .without_time(),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "issuekit starting up");

    Ok(())
}
