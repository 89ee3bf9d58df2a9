//! Application context - dependency injection container

use std::sync::Arc;

use focustide_common::{Clock, SystemClock};
use focustide_core::stats::StatsRepository;
use focustide_core::timer::ports::{
    CompletionAlarm, CompletionListener, NotificationSink, SettingsStore, SnapshotStore,
};
use focustide_core::{NotifyOnCompletion, Reconciler, StatsService, TaskService, TimerEngine};
use focustide_domain::{AppConfig, DisplayState, Result, TimerEvent, TimerStatus};
use focustide_infra::{
    AlarmScheduler, DbManager, EventBus, ForegroundTicker, LogNotifier, SqliteStateStore,
    SqliteTaskRepository,
};
use parking_lot::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Application context - holds all services and dependencies
///
/// One context per process. The background worker spawned at
/// initialization owns the durable completion path; foreground views come
/// and go through [`AppContext::attach_foreground`] /
/// [`AppContext::detach_foreground`].
pub struct AppContext {
    pub config: AppConfig,
    pub engine: Arc<TimerEngine>,
    pub tasks: Arc<TaskService>,
    pub stats: Arc<StatsService>,
    pub bus: EventBus,
    pub(crate) clock: Arc<dyn Clock>,
    reconciler: Reconciler,
    pub(crate) ticker: ForegroundTicker,
    background: Mutex<Option<JoinHandle<()>>>,
}

impl AppContext {
    /// Initialize the application with the system clock.
    pub async fn initialize(config: AppConfig) -> Result<Arc<Self>> {
        Self::initialize_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Initialize the application with an explicit clock.
    ///
    /// Tests inject a mock clock here to drive reconciliation
    /// deterministically.
    pub async fn initialize_with_clock(
        config: AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Arc<Self>> {
        let db = Arc::new(DbManager::new(&config.database.path)?);
        let store = Arc::new(SqliteStateStore::new(Arc::clone(&db)));

        // First run: seed the duration settings from the configuration so
        // later attaches see the same lengths the install saw.
        let durations = match store.load_durations().await {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                info!("no saved settings; seeding defaults");
                if let Err(err) = store.save_durations(&config.timer).await {
                    warn!(error = %err, "failed to seed duration settings");
                }
                config.timer
            }
            Err(err) => {
                warn!(error = %err, "failed to load duration settings; using configured defaults");
                config.timer
            }
        };

        let bus = EventBus::new();
        let alarm = Arc::new(AlarmScheduler::new(bus.clone()));
        let stats = Arc::new(StatsService::new(
            Arc::clone(&store) as Arc<dyn StatsRepository>,
            Arc::clone(&clock),
        ));

        let engine = Arc::new(
            TimerEngine::new(
                Arc::clone(&clock),
                Arc::clone(&store) as Arc<dyn SnapshotStore>,
                Arc::clone(&store) as Arc<dyn SettingsStore>,
                Arc::clone(&alarm) as Arc<dyn CompletionAlarm>,
            )
            .with_durations(durations)
            .with_listener(Arc::clone(&stats) as Arc<dyn CompletionListener>)
            .with_listener(Arc::new(NotifyOnCompletion::new(
                Arc::new(LogNotifier) as Arc<dyn NotificationSink>
            )))
            .with_listener(Arc::new(bus.clone()) as Arc<dyn CompletionListener>),
        );

        let tasks = Arc::new(TaskService::new(
            Arc::new(SqliteTaskRepository::new(Arc::clone(&db))),
            Arc::clone(&stats),
            Arc::clone(&clock),
        ));

        let reconciler =
            Reconciler::new(Arc::clone(&store) as Arc<dyn SnapshotStore>, Arc::clone(&clock));
        let ticker = ForegroundTicker::new(Arc::clone(&engine));

        let background = spawn_background_worker(&bus, Arc::clone(&engine));

        Ok(Arc::new(Self {
            config,
            engine,
            tasks,
            stats,
            bus,
            clock,
            reconciler,
            ticker,
            background: Mutex::new(Some(background)),
        }))
    }

    /// Attach a foreground view.
    ///
    /// Reconciles the persisted snapshot against elapsed wall-clock time
    /// and, if the session is live, restarts the local display tick. The
    /// returned state is authoritative.
    pub async fn attach_foreground(&self) -> Result<DisplayState> {
        let state = self.reconciler.reconcile(&self.engine).await?;
        if state.status == TimerStatus::Running {
            self.ticker.start();
        }
        Ok(state)
    }

    /// Detach the foreground view, stopping the local display tick.
    ///
    /// The background alarm stays armed; the snapshot written on the last
    /// transition carries the state to the next attach.
    pub fn detach_foreground(&self) {
        self.ticker.stop();
    }

    /// Stop the background worker and the display tick.
    pub fn shutdown(&self) {
        self.ticker.stop();
        if let Some(handle) = self.background.lock().take() {
            handle.abort();
        }
        info!("application context shut down");
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Route background alarm firings into the engine's completion path.
fn spawn_background_worker(bus: &EventBus, engine: Arc<TimerEngine>) -> JoinHandle<()> {
    let mut events = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(TimerEvent::AlarmFired) => {
                    if let Err(err) = engine.handle_alarm_fired().await {
                        error!(error = %err, "failed to handle completion alarm");
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "background worker lagged behind the event bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
