//! Tracing setup for the bootstrap binary.
//!
//! The console narration is the operator's only reliable signal that a
//! stage degraded (exit codes stay 0 on soft failures), so the subscriber
//! is configured once, up front, before any stage runs.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// * `json` — emit newline-delimited JSON log lines instead of the human
///   console format.
/// * `level` — default verbosity when `RUST_LOG` is not set; `RUST_LOG`
///   wins when present.
///
/// Safe to call more than once; only the first call takes effect (the
/// global subscriber can only be set once per process).
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    if json {
        builder.json().try_init().ok();
    } else {
        builder.try_init().ok();
    }
}
