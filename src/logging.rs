use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Install the global subscriber, filtered by `RUST_LOG` and defaulting to `info`
///
/// Safe to call more than once, only the first call installs anything
#[uniffi::export]
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        if let Err(error) = fmt().with_env_filter(filter).with_target(true).try_init() {
            eprintln!("logging already initialized: {error}");
        }
    });
}
