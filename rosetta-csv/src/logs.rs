//! Progress logging for the generator.
//!
//! Standard output carries the manifest itself, so every log line goes
//! to stderr through a `tracing` subscriber. The `log_*` helpers keep
//! pipeline code terse.

use tracing_subscriber::EnvFilter;

/// Log level used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Install the stderr subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn log_info(msg: impl Into<String>) {
    tracing::info!("{}", msg.into());
}

pub fn log_success(msg: impl Into<String>) {
    tracing::info!("✓ {}", msg.into());
}

pub fn log_warning(msg: impl Into<String>) {
    tracing::warn!("{}", msg.into());
}

pub fn log_error(msg: impl Into<String>) {
    tracing::error!("{}", msg.into());
}

/// Debug-level detail, indented under the preceding info line.
pub fn log_detail(msg: impl Into<String>, indent: u8) {
    let pad = "   ".repeat(indent as usize);
    tracing::debug!("{}{}", pad, msg.into());
}
