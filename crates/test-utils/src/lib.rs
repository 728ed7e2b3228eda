//! Shared fixtures for `coursedag` integration tests.

pub mod builders;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test-friendly tracing subscriber once per test binary.
///
/// Output goes through the test writer, so it only shows up for failing
/// tests (or with `-- --nocapture`). The filter comes from
/// `COURSEDAG_LOG`, then `RUST_LOG`, then defaults to `warn`, e.g.
/// `COURSEDAG_LOG=coursedag::ledger=debug cargo test --test ledger_conflicts`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("COURSEDAG_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
