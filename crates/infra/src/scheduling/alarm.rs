//! One-shot completion alarm
//!
//! The background context's coarse trigger for session completion. Firing
//! does not touch the engine directly; it publishes [`TimerEvent::AlarmFired`]
//! on the event bus and the background worker routes that into the
//! engine's completion path, which recomputes due-ness from wall-clock
//! time. Alarm timing is therefore never trusted for correctness, only
//! for wake-up.

use std::time::Duration;

use async_trait::async_trait;
use focustide_core::timer::ports::CompletionAlarm;
use focustide_domain::constants::COMPLETION_ALARM_NAME;
use focustide_domain::{Result, TimerEvent};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::messaging::EventBus;

/// Tokio-backed one-shot alarm
pub struct AlarmScheduler {
    bus: EventBus,
    pending: Mutex<Option<CancellationToken>>,
}

impl AlarmScheduler {
    /// Create an alarm that fires onto the given bus.
    pub fn new(bus: EventBus) -> Self {
        Self { bus, pending: Mutex::new(None) }
    }
}

#[async_trait]
impl CompletionAlarm for AlarmScheduler {
    async fn schedule(&self, delay: Duration) -> Result<()> {
        let token = CancellationToken::new();
        let previous = self.pending.lock().replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        debug!(
            alarm = COMPLETION_ALARM_NAME,
            delay_seconds = delay.as_secs(),
            "completion alarm armed"
        );

        let bus = self.bus.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("completion alarm cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    debug!("completion alarm elapsed");
                    bus.publish(TimerEvent::AlarmFired);
                }
            }
        });

        Ok(())
    }

    fn cancel(&self) {
        // Token cancellation is synchronous: once this returns, the armed
        // task can only observe the cancelled branch.
        if let Some(token) = self.pending.lock().take() {
            token.cancel();
        }
    }
}

/// Cancel any pending alarm when the scheduler goes away
impl Drop for AlarmScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
