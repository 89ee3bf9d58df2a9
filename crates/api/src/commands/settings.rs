//! Settings commands

use std::sync::Arc;
use std::time::Instant;

use focustide_domain::{DurationConfig, Result, TimerMode};

use crate::context::AppContext;
use crate::logging::log_command_execution;

/// Update the configured length of `mode` in minutes.
///
/// Applies immediately when the timer is idle in that mode.
pub async fn update_duration(
    context: &Arc<AppContext>,
    mode: TimerMode,
    minutes: u32,
) -> Result<DurationConfig> {
    let started = Instant::now();
    let result = context.engine.update_duration(mode, minutes).await;
    log_command_execution("settings::update_duration", started.elapsed(), result.is_ok());
    result?;

    Ok(context.engine.durations())
}

/// Current duration settings.
pub fn durations(context: &Arc<AppContext>) -> DurationConfig {
    context.engine.durations()
}
