//! FocusTide headless binary
//!
//! Runs the background context: reconciles any persisted session on
//! startup, keeps the completion alarm armed, and logs timer events until
//! interrupted. UI collaborators embed the library crate instead of
//! spawning this binary.

use focustide_app::{logging, AppContext};
use focustide_common::time::format_countdown;
use focustide_domain::TimerEvent;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = focustide_infra::config::load();
    let context = AppContext::initialize(config).await?;

    let state = context.attach_foreground().await?;
    info!(
        mode = state.mode.label(),
        status = ?state.status,
        remaining = %format_countdown(state.remaining_seconds),
        "timer ready"
    );

    let mut events = context.bus.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received; shutting down");
                break;
            }
            event = events.recv() => match event {
                Ok(TimerEvent::Completed(completion)) => {
                    info!(
                        mode = completion.completed_mode.label(),
                        minutes = completion.duration_minutes,
                        "session completed"
                    );
                }
                Ok(TimerEvent::AlarmFired) => {}
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    }

    context.detach_foreground();
    context.shutdown();
    Ok(())
}
