//! Timer commands

use std::sync::Arc;
use std::time::Instant;

use focustide_domain::{DisplayState, Result, TimerMode};

use crate::context::AppContext;
use crate::logging::log_command_execution;

/// Start or resume the countdown and begin the local display tick.
pub async fn start(context: &Arc<AppContext>) -> Result<DisplayState> {
    let started = Instant::now();
    let result = context.engine.start().await;
    log_command_execution("timer::start", started.elapsed(), result.is_ok());
    result?;

    context.ticker.start();
    Ok(context.engine.display_state())
}

/// Pause the countdown and stop the local display tick.
pub async fn pause(context: &Arc<AppContext>) -> Result<DisplayState> {
    let started = Instant::now();
    let result = context.engine.pause().await;
    log_command_execution("timer::pause", started.elapsed(), result.is_ok());
    result?;

    context.ticker.stop();
    Ok(context.engine.display_state())
}

/// Reset the countdown to the full duration of the current mode.
pub async fn reset(context: &Arc<AppContext>) -> Result<DisplayState> {
    let started = Instant::now();
    let result = context.engine.reset().await;
    log_command_execution("timer::reset", started.elapsed(), result.is_ok());
    result?;

    context.ticker.stop();
    Ok(context.engine.display_state())
}

/// Switch the session mode. A no-op while the timer is running.
pub async fn set_mode(context: &Arc<AppContext>, mode: TimerMode) -> Result<DisplayState> {
    let started = Instant::now();
    let result = context.engine.set_mode(mode).await;
    log_command_execution("timer::set_mode", started.elapsed(), result.is_ok());
    result?;

    Ok(context.engine.display_state())
}

/// Current timer state for display.
pub fn display_state(context: &Arc<AppContext>) -> DisplayState {
    context.engine.display_state()
}
