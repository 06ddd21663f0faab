//! Bare `RUST_LOG`-driven subscriber for tests and one-off tools.
//!
//! The runtime's configurable subscriber lives in `ainet_node::logging`.

use tracing_subscriber::EnvFilter;

/// Install a plain formatting subscriber filtered by `RUST_LOG`
/// (default `warn`). Returns `false` if one was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .is_ok()
}
