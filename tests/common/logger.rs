use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

pub fn init_test_logger() {
    // Use call_once_force to recover if an earlier initialization attempt panicked.
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        // Rehash events are logged at debug; override via RUST_LOG when needed.
        builder
            .filter_level(LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env()
            .is_test(true);

        // Avoid panicking if the logger was already initialized elsewhere.
        let _ = builder.try_init();
    });
}
