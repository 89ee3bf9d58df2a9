//! Timer engine - countdown state machine
//!
//! The engine owns the in-memory [`TimerSession`] and is the single source
//! of truth while a foreground view is attached. Transitions update local
//! state first and then fire the persistence write; a failed write is
//! logged and the in-memory state stays authoritative until the next
//! successful write.
//!
//! The engine does not own the per-second tick loop. The attachment layer
//! drives [`TimerEngine::tick`] once per second whenever it observes a
//! running engine, and the background context routes its alarm firing into
//! [`TimerEngine::handle_alarm_fired`].

use std::sync::Arc;
use std::time::Duration;

use focustide_common::time::Clock;
use focustide_domain::{
    CompletionEvent, DisplayState, DurationConfig, FocusTideError, Result, TimerMode, TimerSession,
    TimerSnapshot, TimerStatus,
};
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::ports::{CompletionAlarm, CompletionListener, SettingsStore, SnapshotStore};

struct EngineState {
    session: TimerSession,
    durations: DurationConfig,
}

/// Countdown state machine
///
/// States: Idle, Running, Paused. Transitions: Idle/Paused -> Running
/// (`start`), Running -> Paused (`pause`), Running -> Idle (completion),
/// any -> Idle (`reset`). The engine is long-lived and cycles through
/// sessions indefinitely.
pub struct TimerEngine {
    state: Mutex<EngineState>,
    clock: Arc<dyn Clock>,
    snapshots: Arc<dyn SnapshotStore>,
    settings: Arc<dyn SettingsStore>,
    alarm: Arc<dyn CompletionAlarm>,
    listeners: Vec<Arc<dyn CompletionListener>>,
}

impl TimerEngine {
    /// Create a new engine with an idle Focus session at the default
    /// durations.
    pub fn new(
        clock: Arc<dyn Clock>,
        snapshots: Arc<dyn SnapshotStore>,
        settings: Arc<dyn SettingsStore>,
        alarm: Arc<dyn CompletionAlarm>,
    ) -> Self {
        let durations = DurationConfig::default();
        let session = TimerSession::fresh(TimerMode::Focus, &durations);
        Self {
            state: Mutex::new(EngineState { session, durations }),
            clock,
            snapshots,
            settings,
            alarm,
            listeners: Vec::new(),
        }
    }

    /// Seed the engine with previously saved durations.
    ///
    /// Refreshes the idle session so the new lengths take effect
    /// immediately. Intended for construction time, before the engine is
    /// shared.
    pub fn with_durations(self, durations: DurationConfig) -> Self {
        {
            let mut state = self.state.lock();
            let mode = state.session.mode;
            state.durations = durations;
            state.session = TimerSession::fresh(mode, &durations);
        }
        self
    }

    /// Register a completion listener.
    pub fn with_listener(mut self, listener: Arc<dyn CompletionListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Read-only view of the current session for UI collaborators.
    pub fn display_state(&self) -> DisplayState {
        DisplayState::of(&self.state.lock().session)
    }

    /// Current duration settings.
    pub fn durations(&self) -> DurationConfig {
        self.state.lock().durations
    }

    /// Install a reconciled session without side effects.
    ///
    /// Reconciliation-layer use only: no persistence write, no alarm
    /// interaction, no events.
    pub fn restore(&self, session: TimerSession) {
        self.state.lock().session = session;
    }

    /// Start or resume the countdown.
    ///
    /// Requests the one-shot completion alarm for the remaining time; the
    /// attachment layer begins the local per-second tick when it observes
    /// the running state.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` (state unchanged) if already running.
    pub async fn start(&self) -> Result<()> {
        let remaining = {
            let mut state = self.state.lock();
            if state.session.is_running() {
                warn!("start ignored: timer already running");
                return Err(FocusTideError::InvalidTransition(
                    "timer is already running".to_string(),
                ));
            }
            state.session.status = TimerStatus::Running;
            state.session.started_at = Some(self.clock.utc_now());
            state.session.remaining_seconds
        };

        // Alarm failure costs the durability backstop, not correctness: a
        // live foreground tick still completes the session.
        if let Err(err) = self.alarm.schedule(Duration::from_secs(u64::from(remaining))).await {
            error!(error = %err, "failed to schedule completion alarm");
        }

        self.persist().await;
        info!(remaining_seconds = remaining, "timer started");
        Ok(())
    }

    /// Pause the countdown, preserving the remaining time exactly at the
    /// second already decremented.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` (state unchanged) unless running.
    pub async fn pause(&self) -> Result<()> {
        {
            let mut state = self.state.lock();
            if !state.session.is_running() {
                warn!("pause ignored: timer not running");
                return Err(FocusTideError::InvalidTransition(
                    "pause requires a running timer".to_string(),
                ));
            }
            state.session.status = TimerStatus::Paused;
            state.session.started_at = None;
        }

        // Cancel before returning so a completion cannot fire after the
        // user stopped the timer.
        self.alarm.cancel();

        self.persist().await;
        info!("timer paused");
        Ok(())
    }

    /// Reset to an idle session at the full configured duration for the
    /// current mode.
    pub async fn reset(&self) -> Result<()> {
        {
            let mut state = self.state.lock();
            let (mode, durations) = (state.session.mode, state.durations);
            state.session = TimerSession::fresh(mode, &durations);
        }

        self.alarm.cancel();

        self.persist().await;
        info!("timer reset");
        Ok(())
    }

    /// Switch the session mode.
    ///
    /// Silently ignored while running: the caller sees success and the
    /// state is untouched. This mirrors how the mode buttons behave in the
    /// UI, where a click during a running session does nothing.
    pub async fn set_mode(&self, mode: TimerMode) -> Result<()> {
        {
            let mut state = self.state.lock();
            if state.session.is_running() {
                drop(state);
                warn!(mode = mode.label(), "mode change ignored while timer is running");
                return Ok(());
            }
            let durations = state.durations;
            state.session = TimerSession::fresh(mode, &durations);
        }

        self.persist().await;
        debug!(mode = mode.label(), "mode switched");
        Ok(())
    }

    /// Update the configured length of `mode`.
    ///
    /// If `mode` is the current mode and the timer is not running, the new
    /// length takes effect immediately.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDuration` (prior value retained) for a zero minute
    /// count.
    pub async fn update_duration(&self, mode: TimerMode, minutes: u32) -> Result<()> {
        if minutes == 0 {
            return Err(FocusTideError::InvalidDuration(
                "session length must be at least one minute".to_string(),
            ));
        }

        let (durations, reapply) = {
            let mut state = self.state.lock();
            state.durations.set_minutes(mode, minutes);
            let durations = state.durations;
            let reapply = state.session.mode == mode && !state.session.is_running();
            if reapply {
                state.session = TimerSession::fresh(mode, &durations);
            }
            (durations, reapply)
        };

        if let Err(err) = self.settings.save_durations(&durations).await {
            warn!(error = %err, "failed to persist duration settings; keeping in-memory values");
        }

        if reapply {
            self.persist().await;
        }

        info!(mode = mode.label(), minutes, "duration updated");
        Ok(())
    }

    /// Advance the countdown by one second.
    ///
    /// Driven by the foreground ticker while running. Reaching zero runs
    /// the completion path. A tick against a non-running engine is a
    /// no-op, which makes a late ticker firing after pause harmless.
    pub async fn tick(&self) -> Result<()> {
        let completed = {
            let mut state = self.state.lock();
            if !state.session.is_running() {
                return Ok(());
            }
            state.session.remaining_seconds = state.session.remaining_seconds.saturating_sub(1);
            state.session.remaining_seconds == 0
        };

        if completed {
            self.complete().await;
        }
        Ok(())
    }

    /// Background-context entry point for the completion alarm firing.
    ///
    /// Idempotent with a live tick completion: if the session is no longer
    /// running (already completed, paused, or reset) the firing is
    /// ignored.
    pub async fn handle_alarm_fired(&self) -> Result<()> {
        let running = self.state.lock().session.is_running();
        if !running {
            debug!("completion alarm fired with no running session; ignoring");
            return Ok(());
        }

        info!("completion alarm fired");
        self.complete().await;
        Ok(())
    }

    /// Complete the current session and enter the next mode.
    ///
    /// Shared by the live tick, the background alarm, and reconciliation,
    /// so the outcome is identical however completion is observed. Emits
    /// exactly one completion event.
    pub(crate) async fn complete(&self) {
        let event = {
            let mut state = self.state.lock();
            let completed_mode = state.session.mode;
            let duration_minutes = state.session.total_seconds / 60;
            let durations = state.durations;
            state.session = TimerSession::fresh(completed_mode.next(), &durations);
            CompletionEvent { completed_mode, duration_minutes }
        };

        self.alarm.cancel();

        // The persisted snapshot now reads Idle in the next mode, so a
        // replayed reconciliation observes no running session and cannot
        // re-fire the completion.
        self.persist().await;

        info!(
            completed_mode = event.completed_mode.label(),
            duration_minutes = event.duration_minutes,
            "session completed"
        );

        for listener in &self.listeners {
            if let Err(err) = listener.on_completion(&event).await {
                error!(error = %err, "completion listener failed");
            }
        }
    }

    /// Write the current session to the snapshot store.
    ///
    /// Storage failure degrades to in-memory state with a warning.
    async fn persist(&self) {
        let snapshot = TimerSnapshot::of(&self.state.lock().session);
        if let Err(err) = self.snapshots.save_snapshot(&snapshot).await {
            warn!(error = %err, "failed to persist timer snapshot; continuing in memory");
        }
    }
}
