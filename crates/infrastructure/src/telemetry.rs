//! Tracing initialization
//!
//! One process-wide subscriber, built once at startup from the verbosity
//! flag. Production mode emits compact info-level lines without caller
//! location; verbose mode emits pretty debug-level lines with file and
//! line numbers. An explicit `RUST_LOG` always wins over the flag.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber
///
/// Must be called exactly once, before any spans or events are emitted.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    if verbose {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}
