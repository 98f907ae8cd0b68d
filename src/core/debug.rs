//! Tracing setup. `QTON_DEBUG=1` (or `--debug`) turns on engine-level output;
//! otherwise `RUST_LOG` is honoured and the default is `warn`.
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static ENABLED: OnceLock<bool> = OnceLock::new();

pub fn is_enabled() -> bool {
    *ENABLED.get_or_init(|| std::env::var("QTON_DEBUG").ok().as_deref() == Some("1"))
}

/// Install the global subscriber on stderr. Safe to call more than once.
pub fn init(force_debug: bool) {
    let filter = if force_debug || is_enabled() {
        EnvFilter::new("qton=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
