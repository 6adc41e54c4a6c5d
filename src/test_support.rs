//! Shared helpers for in-crate unit tests.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install `env_logger` once per test binary; `RUST_LOG` overrides the
/// default `info` filter.
pub(crate) fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .is_test(true)
            .try_init();
    });
}
