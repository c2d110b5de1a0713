//! Logging initialization.
//!
//! Log output goes to stderr so it never mixes with command output
//! (theme listings, schema JSON). The filter is taken from `RUST_LOG`,
//! defaulting to warnings only.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// Safe to call once at startup; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
