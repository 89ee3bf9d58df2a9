//! Snapshot reconciliation
//!
//! The single entry point for reconstructing timer state when a foreground
//! view attaches. Real time has passed while no tick was running, so the
//! remaining time is recomputed purely from wall-clock elapsed time; an
//! in-memory counter from a previous attachment is never trusted.

use std::sync::Arc;

use focustide_common::time::Clock;
use focustide_domain::{DisplayState, Result, TimerMode, TimerSession, TimerStatus};
use tracing::{debug, info, warn};

use super::engine::TimerEngine;
use super::ports::SnapshotStore;

/// Reconstructs engine state from the persisted snapshot plus elapsed
/// wall-clock time
///
/// A missing or partially-populated snapshot is a normal cold start, not
/// an error: the engine falls back to a fresh idle Focus session.
/// Reconciliation is idempotent; a session reconciled into completion
/// clears its running snapshot, so a replayed read observes Idle and the
/// completion event cannot fire twice.
pub struct Reconciler {
    snapshots: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
}

impl Reconciler {
    /// Create a new reconciler.
    pub fn new(snapshots: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        Self { snapshots, clock }
    }

    /// Produce the authoritative session on foreground attach.
    ///
    /// After this returns, the engine's in-memory session is the single
    /// source of truth; the caller restarts the local tick if the returned
    /// state is running. No new completion alarm is scheduled here: the
    /// background alarm armed at `start` remains authoritative for firing.
    pub async fn reconcile(&self, engine: &TimerEngine) -> Result<DisplayState> {
        let snapshot = match self.snapshots.load_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "failed to read persisted timer state; starting cold");
                None
            }
        };

        let durations = engine.durations();

        let Some(snapshot) = snapshot else {
            debug!("no persisted timer state; starting a fresh session");
            engine.restore(TimerSession::fresh(TimerMode::Focus, &durations));
            return Ok(engine.display_state());
        };

        if snapshot.status != TimerStatus::Running {
            engine.restore(snapshot.into_session(&durations));
            return Ok(engine.display_state());
        }

        let Some(started_at) = snapshot.started_at else {
            // A running snapshot without its start timestamp is a partial
            // write; treat it like an absent snapshot.
            warn!("running snapshot missing start timestamp; starting cold");
            engine.restore(TimerSession::fresh(TimerMode::Focus, &durations));
            return Ok(engine.display_state());
        };

        let now = self.clock.utc_now();
        let elapsed_seconds =
            u32::try_from((now - started_at).num_seconds().max(0)).unwrap_or(u32::MAX);

        let mut session = snapshot.into_session(&durations);
        let effective_remaining = session.remaining_seconds.saturating_sub(elapsed_seconds);

        if effective_remaining == 0 {
            // The session ran out while no foreground was attached. Route
            // through the engine's completion path so the outcome is
            // identical to a live completion.
            info!(
                elapsed_seconds,
                mode = session.mode.label(),
                "session completed while detached; reconstructing completion"
            );
            session.remaining_seconds = 0;
            engine.restore(session);
            engine.complete().await;
        } else {
            debug!(
                elapsed_seconds,
                effective_remaining, "resuming live session from persisted state"
            );
            session.remaining_seconds = effective_remaining;
            // Re-anchor the start timestamp: the remaining time is now
            // relative to this instant. The stored snapshot is left
            // untouched, which keeps reconciliation idempotent.
            session.started_at = Some(now);
            engine.restore(session);
        }

        Ok(engine.display_state())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use focustide_domain::TimerSnapshot;

    use super::super::engine::test_support::{harness, Harness};
    use super::*;

    fn reconciler(h: &Harness) -> Reconciler {
        Reconciler::new(
            Arc::clone(&h.snapshots) as Arc<dyn SnapshotStore>,
            Arc::new(h.clock.clone()),
        )
    }

    fn store_running(h: &Harness, remaining_seconds: u32, started_seconds_ago: u64) {
        let started_at = h.clock.utc_now() - chrono::Duration::seconds(started_seconds_ago as i64);
        *h.snapshots.snapshot.lock() = Some(TimerSnapshot {
            status: TimerStatus::Running,
            mode: TimerMode::Focus,
            remaining_seconds,
            started_at: Some(started_at),
        });
    }

    #[tokio::test]
    async fn missing_snapshot_yields_fresh_idle_focus_session() {
        let h = harness();

        let state = reconciler(&h).reconcile(&h.engine).await.unwrap();

        assert_eq!(state.status, TimerStatus::Idle);
        assert_eq!(state.mode, TimerMode::Focus);
        assert_eq!(state.remaining_seconds, 25 * 60);
    }

    #[tokio::test]
    async fn running_snapshot_resumes_with_elapsed_time_subtracted() {
        let h = harness();
        store_running(&h, 100, 30);

        let state = reconciler(&h).reconcile(&h.engine).await.unwrap();

        assert_eq!(state.status, TimerStatus::Running);
        assert_eq!(state.remaining_seconds, 70);
        assert!(h.listener.events.lock().is_empty());
    }

    #[tokio::test]
    async fn resuming_does_not_schedule_a_new_alarm() {
        let h = harness();
        store_running(&h, 100, 30);

        reconciler(&h).reconcile(&h.engine).await.unwrap();

        assert!(h.alarm.scheduled.lock().is_empty());
    }

    #[tokio::test]
    async fn expired_snapshot_completes_with_exactly_one_event() {
        let h = harness();
        store_running(&h, 10, 15);

        let state = reconciler(&h).reconcile(&h.engine).await.unwrap();

        assert_eq!(state.status, TimerStatus::Idle);
        assert_eq!(state.mode, TimerMode::ShortBreak);

        let events = h.listener.events.lock().clone();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].completed_mode, TimerMode::Focus);
    }

    #[tokio::test]
    async fn completion_is_not_replayed_on_the_next_attach() {
        let h = harness();
        store_running(&h, 10, 15);
        let r = reconciler(&h);

        r.reconcile(&h.engine).await.unwrap();
        let second = r.reconcile(&h.engine).await.unwrap();

        assert_eq!(second.status, TimerStatus::Idle);
        assert_eq!(h.listener.events.lock().len(), 1);
    }

    #[tokio::test]
    async fn reconcile_is_idempotent_when_no_time_elapses() {
        let h = harness();
        store_running(&h, 100, 30);
        let r = reconciler(&h);

        let first = r.reconcile(&h.engine).await.unwrap();
        let second = r.reconcile(&h.engine).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn resumed_session_stays_consistent_as_time_keeps_passing() {
        let h = harness();
        store_running(&h, 100, 30);
        let r = reconciler(&h);

        let first = r.reconcile(&h.engine).await.unwrap();
        assert_eq!(first.remaining_seconds, 70);

        // The foreground dies again without writing anything; another 20
        // seconds pass before the next attach.
        h.clock.advance(Duration::from_secs(20));
        let second = r.reconcile(&h.engine).await.unwrap();

        assert_eq!(second.status, TimerStatus::Running);
        assert_eq!(second.remaining_seconds, 50);
    }

    #[tokio::test]
    async fn paused_snapshot_is_returned_unchanged() {
        let h = harness();
        *h.snapshots.snapshot.lock() = Some(TimerSnapshot {
            status: TimerStatus::Paused,
            mode: TimerMode::ShortBreak,
            remaining_seconds: 42,
            started_at: None,
        });

        let state = reconciler(&h).reconcile(&h.engine).await.unwrap();

        assert_eq!(state.status, TimerStatus::Paused);
        assert_eq!(state.mode, TimerMode::ShortBreak);
        assert_eq!(state.remaining_seconds, 42);
    }

    #[tokio::test]
    async fn running_snapshot_without_start_timestamp_starts_cold() {
        let h = harness();
        *h.snapshots.snapshot.lock() = Some(TimerSnapshot {
            status: TimerStatus::Running,
            mode: TimerMode::Focus,
            remaining_seconds: 100,
            started_at: None,
        });

        let state = reconciler(&h).reconcile(&h.engine).await.unwrap();

        assert_eq!(state.status, TimerStatus::Idle);
        assert_eq!(state.remaining_seconds, 25 * 60);
        assert!(h.listener.events.lock().is_empty());
    }
}
