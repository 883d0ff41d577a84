//! Logging setup.

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g., `TIDYVIZ_LOG=tidyviz_corpus=trace`).
pub const LOG_ENV: &str = "TIDYVIZ_LOG";

/// Returns the filter to use: `debug` when verbose, else `TIDYVIZ_LOG`, else `warn`.
pub fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs a fmt subscriber writing to stderr so stdout stays clean for JSON.
///
/// Call once, at startup.
pub fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
