//! Tracing initialization.
//!
//! One fmt subscriber for the whole process. `RUST_LOG` is honored when
//! set; the default keeps stdout at `warn` so batch runs stay quiet.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Safe to call more than once; subsequent calls are ignored rather than
/// panicking, so tests can initialize freely.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if fmt().with_env_filter(filter).compact().try_init().is_ok() {
        tracing::debug!("tracing initialized");
    }
}
