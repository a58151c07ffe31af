//! Logging setup for the filter binaries.
//!
//! stdout carries the HTML stream, so every log line goes to stderr, which
//! cgit hands through to the web server's error log.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug`.
pub const LOG_ENV: &str = "CGIT_FILTER_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Build the filter from `CGIT_FILTER_LOG`, falling back to `warn`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}
