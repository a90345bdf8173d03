//! Logging initialization.
//!
//! The crate emits structured events through `tracing` (request creation,
//! status transitions, recurrence generation, force-close overrides).
//! Hosts that already install a subscriber can ignore this module.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes a formatted subscriber.
///
/// The level filter comes from `RUST_LOG` (default: `info`), e.g.
/// `RUST_LOG=gearguard_core=debug`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Initializes a test-friendly subscriber at debug level.
///
/// Safe to call from multiple tests; later calls are no-ops.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
