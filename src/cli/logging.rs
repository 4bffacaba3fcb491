//! Tracing initialization for the binary.
//!
//! Logs go to stderr so they never interleave with the menus on stdout.

use tracing_subscriber::EnvFilter;

use super::LogFormat;

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool, format: LogFormat) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // Err only means a subscriber is already installed.
    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .ok();
}
