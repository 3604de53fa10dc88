//! Tracing subscriber wiring.

use tracing_subscriber::EnvFilter;

/// Level filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber: JSON output with timestamps,
/// `RUST_LOG`-style filtering.
///
/// Safe to call from both the binary and tests; only the first call
/// installs anything.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
