//! Installs a `tracing_subscriber` formatter, filtered by the
//! environment (`RUST_LOG`), so the spans of a match are printed.
//!
//! ```bash
//! RUST_LOG=roadmatch=debug cargo bench --features tracing
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log traces.
///
/// Does nothing if a global subscriber is already set.
pub fn initialize_tracer() {
    let fmt_layer = tracing_subscriber::fmt::layer().compact();

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init();
}
