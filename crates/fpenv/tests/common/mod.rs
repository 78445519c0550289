//! # Test Harness
//!
//! Helpers shared by every test module.

use std::sync::Once;

use ieee754_fpenv::{FpEnvConfig, RoundingMode, get_rounding_mode};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per test binary.
///
/// Defaults to `warn` so that formatting work does not run between a
/// hardware clear and the following test unless `RUST_LOG` asks for it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Puts the calling thread into the default environment: round to nearest,
/// hardware and software flags cleared.
pub fn reset_env() {
    init_tracing();
    FpEnvConfig::default().apply().unwrap();
    assert_eq!(get_rounding_mode(), RoundingMode::ToNearestEven);
}
