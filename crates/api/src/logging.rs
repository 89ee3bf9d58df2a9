//! Logging bootstrap and command instrumentation

use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info` for the workspace
/// crates. Safe to call once per process; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,focustide_core=info,focustide_infra=info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
}

/// Log the outcome of a command execution with structured fields.
///
/// Keeps the command wrappers concise and the log shape consistent.
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub(crate) fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}
