//! Foreground display ticker
//!
//! Drives the engine's per-second decrement while a foreground view is
//! attached. The ticker stops itself as soon as the engine is no longer
//! running, so completion, pause and reset all end the loop without
//! explicit coordination.

use std::sync::Arc;
use std::time::Duration;

use focustide_core::timer::TimerEngine;
use focustide_domain::constants::TICK_INTERVAL_MS;
use focustide_domain::TimerStatus;
use parking_lot::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Cancellable one-second tick loop
pub struct ForegroundTicker {
    engine: Arc<TimerEngine>,
    running: Mutex<Option<CancellationToken>>,
}

impl ForegroundTicker {
    /// Create a ticker for the given engine.
    pub fn new(engine: Arc<TimerEngine>) -> Self {
        Self { engine, running: Mutex::new(None) }
    }

    /// Begin ticking. Replaces any previous tick loop.
    pub fn start(&self) {
        self.stop();

        let token = CancellationToken::new();
        *self.running.lock() = Some(token.clone());

        let engine = Arc::clone(&self.engine);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; skip it so the
            // first decrement lands a full second after start.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        if engine.display_state().status != TimerStatus::Running {
                            break;
                        }
                        if let Err(err) = engine.tick().await {
                            error!(error = %err, "tick failed");
                        }
                    }
                }
            }
            debug!("foreground ticker stopped");
        });
    }

    /// Stop ticking.
    pub fn stop(&self) {
        if let Some(token) = self.running.lock().take() {
            token.cancel();
        }
    }
}

/// Stop the tick loop when the ticker goes away
impl Drop for ForegroundTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use focustide_core::timer::ports::{
        CompletionAlarm, SettingsStore, SnapshotStore,
    };
    use focustide_domain::{DurationConfig, Result, TimerSnapshot};

    use super::*;

    struct NullStore;

    #[async_trait::async_trait]
    impl SnapshotStore for NullStore {
        async fn load_snapshot(&self) -> Result<Option<TimerSnapshot>> {
            Ok(None)
        }

        async fn save_snapshot(&self, _snapshot: &TimerSnapshot) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl SettingsStore for NullStore {
        async fn load_durations(&self) -> Result<Option<DurationConfig>> {
            Ok(None)
        }

        async fn save_durations(&self, _durations: &DurationConfig) -> Result<()> {
            Ok(())
        }
    }

    struct NullAlarm;

    #[async_trait::async_trait]
    impl CompletionAlarm for NullAlarm {
        async fn schedule(&self, _delay: Duration) -> Result<()> {
            Ok(())
        }

        fn cancel(&self) {}
    }

    fn engine() -> Arc<TimerEngine> {
        Arc::new(TimerEngine::new(
            Arc::new(focustide_common::SystemClock),
            Arc::new(NullStore),
            Arc::new(NullStore),
            Arc::new(NullAlarm),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_decrements_once_per_second() {
        let engine = engine();
        engine.start().await.unwrap();
        let ticker = ForegroundTicker::new(Arc::clone(&engine));

        ticker.start();
        tokio::time::sleep(Duration::from_millis(3_500)).await;

        assert_eq!(engine.display_state().remaining_seconds, 25 * 60 - 3);
        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_ticker_no_longer_decrements() {
        let engine = engine();
        engine.start().await.unwrap();
        let ticker = ForegroundTicker::new(Arc::clone(&engine));

        ticker.start();
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        ticker.stop();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(engine.display_state().remaining_seconds, 25 * 60 - 2);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_stops_itself_when_the_engine_pauses() {
        let engine = engine();
        engine.start().await.unwrap();
        let ticker = ForegroundTicker::new(Arc::clone(&engine));

        ticker.start();
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        engine.pause().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(engine.display_state().remaining_seconds, 25 * 60 - 1);
    }
}
