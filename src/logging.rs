//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted first for the log filter.
pub const LOG_ENV: &str = "RECIPEBOX_LOG";

/// Build the filter: `RECIPEBOX_LOG`, then `RUST_LOG`, else `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global fmt subscriber writing to stderr.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
