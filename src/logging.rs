//! Diagnostic logging set-up for the binaries.
//!
//! The correlation table owns stdout, so log records go to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "LIST_SIO_VOLUMES_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Builds the filter from [`LOG_ENV`], falling back to `warn`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global stderr subscriber. Calling it twice is harmless.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
