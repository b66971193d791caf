//! Tracing setup for the splice binary

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the global tracing subscriber.
///
/// `--verbose` forces DEBUG for every target; otherwise the `RUST_LOG`
/// environment variable governs, defaulting to "info".
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let fmt_layer = fmt::layer().with_target(verbose).compact();

    // Double initialization only happens in tests; ignore it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
