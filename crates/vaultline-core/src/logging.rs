//! Tracing subscriber setup
//!
//! Log lines go to stderr so they never mix with command output. The filter
//! comes from `RUST_LOG` and defaults to `warn`.

use tracing_subscriber::EnvFilter;

use crate::output::{color_enabled, Stream};

/// Default filter when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize logging for a binary
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color_enabled(Stream::Stderr))
        .with_target(false)
        .try_init();
}
