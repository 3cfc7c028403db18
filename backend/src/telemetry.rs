//! Tracing subscriber set-up.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    #[default]
    Pretty,
}

/// Install the global subscriber, filtered by `RUST_LOG`.
///
/// Returns `false` when a subscriber was already installed; the failure is
/// logged through the existing subscriber and otherwise ignored.
pub fn init_tracing(format: LogFormat) -> bool {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let outcome = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    match outcome {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "tracing init failed");
            false
        }
    }
}
