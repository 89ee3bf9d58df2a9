//! SQLite-backed state store
//!
//! Implements the snapshot, settings and stats ports on top of the
//! `app_state` key-value table. Values are stored as JSON; a malformed
//! value is treated as absent, which turns a corrupt row into a normal
//! cold start instead of an error.

use std::sync::Arc;

use async_trait::async_trait;
use focustide_core::stats::StatsRepository;
use focustide_core::timer::ports::{SettingsStore, SnapshotStore};
use focustide_domain::constants::{KEY_DURATIONS, KEY_FOCUS_STATS, KEY_TIMER_SNAPSHOT};
use focustide_domain::{DurationConfig, FocusStats, FocusTideError, Result, TimerSnapshot};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task;
use tracing::warn;

use super::manager::{map_join_error, DbManager};

/// SQLite state store for the timer snapshot, duration settings and focus
/// counters
pub struct SqliteStateStore {
    db: Arc<DbManager>,
}

impl SqliteStateStore {
    /// Construct a store backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn load_json<T>(&self, key: &'static str) -> Result<Option<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || -> Result<Option<T>> {
            let Some(raw) = db.get_value(key)? else {
                return Ok(None);
            };
            match serde_json::from_str(&raw) {
                Ok(value) => Ok(Some(value)),
                Err(err) => {
                    warn!(key, error = %err, "malformed stored value; treating as absent");
                    Ok(None)
                }
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save_json<T>(&self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(value)
            .map_err(|err| FocusTideError::Storage(format!("failed to encode {key}: {err}")))?;
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || db.put_value(key, &raw)).await.map_err(map_join_error)?
    }
}

#[async_trait]
impl SnapshotStore for SqliteStateStore {
    async fn load_snapshot(&self) -> Result<Option<TimerSnapshot>> {
        self.load_json(KEY_TIMER_SNAPSHOT).await
    }

    async fn save_snapshot(&self, snapshot: &TimerSnapshot) -> Result<()> {
        self.save_json(KEY_TIMER_SNAPSHOT, snapshot).await
    }
}

#[async_trait]
impl SettingsStore for SqliteStateStore {
    async fn load_durations(&self) -> Result<Option<DurationConfig>> {
        self.load_json(KEY_DURATIONS).await
    }

    async fn save_durations(&self, durations: &DurationConfig) -> Result<()> {
        self.save_json(KEY_DURATIONS, durations).await
    }
}

#[async_trait]
impl StatsRepository for SqliteStateStore {
    async fn load(&self) -> Result<Option<FocusStats>> {
        self.load_json(KEY_FOCUS_STATS).await
    }

    async fn save(&self, stats: &FocusStats) -> Result<()> {
        self.save_json(KEY_FOCUS_STATS, stats).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use focustide_domain::{TimerMode, TimerStatus};

    use super::*;

    fn store() -> SqliteStateStore {
        SqliteStateStore::new(Arc::new(DbManager::in_memory().unwrap()))
    }

    #[tokio::test]
    async fn snapshot_round_trip() {
        let store = store();
        let snapshot = TimerSnapshot {
            status: TimerStatus::Running,
            mode: TimerMode::Focus,
            remaining_seconds: 900,
            started_at: Some(Utc::now()),
        };

        store.save_snapshot(&snapshot).await.unwrap();
        let loaded = store.load_snapshot().await.unwrap();

        assert_eq!(loaded, Some(snapshot));
    }

    #[tokio::test]
    async fn missing_snapshot_reads_as_none() {
        let store = store();

        assert_eq!(store.load_snapshot().await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_snapshot_reads_as_none() {
        let store = store();
        store.db.put_value(KEY_TIMER_SNAPSHOT, "{not json").unwrap();

        assert_eq!(store.load_snapshot().await.unwrap(), None);
    }

    #[tokio::test]
    async fn durations_round_trip() {
        let store = store();
        let durations = DurationConfig { focus_minutes: 50, ..DurationConfig::default() };

        store.save_durations(&durations).await.unwrap();

        assert_eq!(store.load_durations().await.unwrap(), Some(durations));
    }

    #[tokio::test]
    async fn stats_round_trip() {
        let store = store();
        let mut stats = FocusStats::default();
        stats.record_focus_session(25, Utc::now().date_naive());

        StatsRepository::save(&store, &stats).await.unwrap();

        assert_eq!(StatsRepository::load(&store).await.unwrap(), Some(stats));
    }
}
