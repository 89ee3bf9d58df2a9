//! Focus analytics service

use std::sync::Arc;

use async_trait::async_trait;
use focustide_common::time::Clock;
use focustide_domain::{CompletionEvent, FocusStats, Result, TimerMode};
use tracing::warn;

use super::ports::StatsRepository;
use crate::timer::ports::CompletionListener;

/// Focus analytics service
///
/// Counters roll over lazily on access (see [`FocusStats::roll_over`]);
/// loading failures fall back to zeroed counters rather than surfacing an
/// error, so analytics can never take the timer down.
pub struct StatsService {
    repository: Arc<dyn StatsRepository>,
    clock: Arc<dyn Clock>,
}

impl StatsService {
    /// Create a new stats service.
    pub fn new(repository: Arc<dyn StatsRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Record a completed focus session of `duration_minutes`.
    pub async fn record_focus_session(&self, duration_minutes: u32) -> Result<()> {
        let today = self.clock.utc_now().date_naive();
        let mut stats = self.load().await;
        stats.record_focus_session(duration_minutes, today);
        self.repository.save(&stats).await
    }

    /// Record a task marked as completed.
    pub async fn record_task_completed(&self) -> Result<()> {
        let today = self.clock.utc_now().date_naive();
        let mut stats = self.load().await;
        stats.record_task_completed(today);
        self.repository.save(&stats).await
    }

    /// Current counters, rolled over to today.
    ///
    /// If the rollover changed anything, the result is written back so the
    /// stored state keeps up with the calendar.
    pub async fn stats(&self) -> Result<FocusStats> {
        let today = self.clock.utc_now().date_naive();
        let mut stats = self.load().await;
        if stats.roll_over(today) {
            if let Err(err) = self.repository.save(&stats).await {
                warn!(error = %err, "failed to write rolled-over focus stats");
            }
        }
        Ok(stats)
    }

    async fn load(&self) -> FocusStats {
        match self.repository.load().await {
            Ok(Some(stats)) => stats,
            Ok(None) => FocusStats::default(),
            Err(err) => {
                warn!(error = %err, "failed to load focus stats; starting from zero");
                FocusStats::default()
            }
        }
    }
}

/// Completed focus sessions feed the analytics; breaks do not.
#[async_trait]
impl CompletionListener for StatsService {
    async fn on_completion(&self, event: &CompletionEvent) -> Result<()> {
        if event.completed_mode == TimerMode::Focus {
            self.record_focus_session(event.duration_minutes).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use focustide_common::MockClock;

    use super::super::tests_support::MemoryStatsRepository;
    use super::*;

    struct Harness {
        service: StatsService,
        clock: MockClock,
        repository: Arc<MemoryStatsRepository>,
    }

    fn harness() -> Harness {
        let clock = MockClock::new();
        let repository = Arc::new(MemoryStatsRepository::default());
        let service = StatsService::new(
            Arc::clone(&repository) as Arc<dyn StatsRepository>,
            Arc::new(clock.clone()),
        );
        Harness { service, clock, repository }
    }

    #[tokio::test]
    async fn recording_a_session_accumulates_counters() {
        let h = harness();

        h.service.record_focus_session(25).await.unwrap();
        h.service.record_focus_session(25).await.unwrap();

        let stats = h.service.stats().await.unwrap();
        assert_eq!(stats.today_focus_minutes, 50);
        assert_eq!(stats.today_sessions, 2);
        assert_eq!(stats.week_focus_minutes, 50);
    }

    #[tokio::test]
    async fn daily_counters_reset_after_a_day_passes() {
        let h = harness();
        h.service.record_focus_session(25).await.unwrap();

        h.clock.advance(Duration::from_secs(24 * 60 * 60));
        let stats = h.service.stats().await.unwrap();

        assert_eq!(stats.today_focus_minutes, 0);
        assert_eq!(stats.today_sessions, 0);
    }

    #[tokio::test]
    async fn rollover_on_read_is_written_back() {
        let h = harness();
        h.service.record_focus_session(25).await.unwrap();

        h.clock.advance(Duration::from_secs(24 * 60 * 60));
        h.service.stats().await.unwrap();

        let stored = h.repository.stored.lock().clone().unwrap_or_default();
        assert_eq!(stored.today_focus_minutes, 0);
    }

    #[tokio::test]
    async fn only_focus_completions_are_recorded() {
        let h = harness();

        h.service
            .on_completion(&CompletionEvent {
                completed_mode: TimerMode::ShortBreak,
                duration_minutes: 5,
            })
            .await
            .unwrap();
        h.service
            .on_completion(&CompletionEvent {
                completed_mode: TimerMode::Focus,
                duration_minutes: 25,
            })
            .await
            .unwrap();

        let stats = h.service.stats().await.unwrap();
        assert_eq!(stats.today_sessions, 1);
        assert_eq!(stats.today_focus_minutes, 25);
    }

    #[tokio::test]
    async fn load_failure_degrades_to_zeroed_counters() {
        let h = harness();
        h.repository.fail_loads.store(true, std::sync::atomic::Ordering::SeqCst);

        let stats = h.service.stats().await.unwrap();

        assert_eq!(stats.today_focus_minutes, 0);
        assert_eq!(stats.today_sessions, 0);
        assert_eq!(stats.week_focus_minutes, 0);
        assert_eq!(stats.today_tasks, 0);
    }
}
