//! Tracing subscriber bootstrap.

/// Initialize logging with a safe environment filter.
///
/// Uses `RUST_LOG` if set, otherwise falls back to sensible defaults.
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,community_board=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .ok();
}
