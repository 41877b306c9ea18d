//! Logging initialization for nicels.
//!
//! Diagnostics go to stderr through a `tracing` fmt subscriber so they never mix with
//! the listing on stdout.

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding a `tracing` filter directive, e.g. `nicels=debug`.
pub const LOG_ENV: &str = "NICELS_LOG";

/// Install the global subscriber.
///
/// `-v` selects DEBUG. Otherwise `NICELS_LOG` is honored, falling back to WARN.
///
/// # Errors
///
/// Returns an error if a global subscriber was already set.
pub fn initialize_logging(verbose: bool) -> Result<(), SetGlobalDefaultError> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
