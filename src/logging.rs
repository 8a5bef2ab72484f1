//! Tracing setup shared by the binaries

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `debug` or
/// `zecwallet::settings=trace`
pub const LOG_ENV: &str = "ZECWALLET_LOG";

const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Build a filter from the directives in `value`, falling back to `info`
/// when they are missing, blank or invalid.
fn filter_from(value: Option<&str>) -> EnvFilter {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a stderr subscriber filtered by [`LOG_ENV`].
///
/// Only the first call has an effect.
pub fn init() {
    INIT.call_once(|| {
        let filter = filter_from(std::env::var(LOG_ENV).ok().as_deref());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
