use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

static TRACING_INIT: Once = Once::new();

/// Install the fmt subscriber once; `RUST_LOG` overrides the default filter.
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init();
    });
}
