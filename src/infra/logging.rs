//! tracing subscriber setup for the `summarize` binary
//!
//! Logs go to stderr so stdout carries only the report.

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Log output encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Filter directive used when RUST_LOG is unset
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}

/// Initialize structured logging with configurable level via RUST_LOG env var
///
/// Default: WARN, raised to DEBUG in debug mode for per-event narration.
/// Safe to call more than once; later calls are ignored.
pub fn init(debug: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
