//! Timer state machine types
//!
//! The timer is a countdown over one of three session modes. A
//! [`TimerSession`] is the in-memory source of truth while a foreground
//! view is attached; a [`TimerSnapshot`] is its persisted mirror used to
//! reconstruct state after the view goes away.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FOCUS_MINUTES, DEFAULT_LONG_BREAK_MINUTES, DEFAULT_SHORT_BREAK_MINUTES,
};

/// Session mode, determines the countdown duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    /// Human-readable label shown by UI collaborators.
    pub fn label(self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Mode entered automatically when a session of this mode completes.
    ///
    /// Focus alternates with the short break; the long break is only ever
    /// entered through an explicit mode switch.
    pub fn next(self) -> Self {
        match self {
            Self::Focus => Self::ShortBreak,
            Self::ShortBreak | Self::LongBreak => Self::Focus,
        }
    }
}

/// Countdown status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

/// Per-mode session lengths in minutes
///
/// Mutated only by the settings-save operation; read by the engine on mode
/// switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationConfig {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            short_break_minutes: DEFAULT_SHORT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
        }
    }
}

impl DurationConfig {
    /// Configured length of `mode` in minutes.
    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        }
    }

    /// Configured length of `mode` in seconds.
    pub fn seconds_for(&self, mode: TimerMode) -> u32 {
        self.minutes_for(mode) * 60
    }

    /// Replace the length of `mode`. Validation happens in the engine.
    pub fn set_minutes(&mut self, mode: TimerMode, minutes: u32) {
        match mode {
            TimerMode::Focus => self.focus_minutes = minutes,
            TimerMode::ShortBreak => self.short_break_minutes = minutes,
            TimerMode::LongBreak => self.long_break_minutes = minutes,
        }
    }
}

/// One countdown instance from full duration to zero
///
/// Invariants: `remaining_seconds <= total_seconds`, and `started_at` is
/// set if and only if `status == Running`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSession {
    pub mode: TimerMode,
    pub status: TimerStatus,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
    pub started_at: Option<DateTime<Utc>>,
}

impl TimerSession {
    /// Fresh idle session for `mode` at its configured full duration.
    pub fn fresh(mode: TimerMode, durations: &DurationConfig) -> Self {
        let total = durations.seconds_for(mode);
        Self {
            mode,
            status: TimerStatus::Idle,
            remaining_seconds: total,
            total_seconds: total,
            started_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }
}

/// Persisted mirror of the timer state
///
/// Written on every state-affecting transition, read once per foreground
/// attach. `total_seconds` is not persisted; it is recomputed from the
/// duration settings on reconstruction, matching how the durations are
/// the authority for session length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub mode: TimerMode,
    pub remaining_seconds: u32,
    pub started_at: Option<DateTime<Utc>>,
}

impl TimerSnapshot {
    /// Snapshot the given session.
    pub fn of(session: &TimerSession) -> Self {
        Self {
            status: session.status,
            mode: session.mode,
            remaining_seconds: session.remaining_seconds,
            started_at: session.started_at,
        }
    }

    /// Reconstruct a session, recomputing the total from the current
    /// duration settings. Remaining time is clamped to the total so the
    /// session invariant holds even if the settings shrank while the
    /// snapshot was on disk.
    pub fn into_session(self, durations: &DurationConfig) -> TimerSession {
        let total = durations.seconds_for(self.mode);
        TimerSession {
            mode: self.mode,
            status: self.status,
            remaining_seconds: self.remaining_seconds.min(total),
            total_seconds: total,
            started_at: self.started_at,
        }
    }
}

/// Read-only view of the timer handed to UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub mode: TimerMode,
    pub status: TimerStatus,
    pub remaining_seconds: u32,
    pub total_seconds: u32,
}

impl DisplayState {
    pub fn of(session: &TimerSession) -> Self {
        Self {
            mode: session.mode,
            status: session.status,
            remaining_seconds: session.remaining_seconds,
            total_seconds: session.total_seconds,
        }
    }
}

/// Emitted exactly once per session completion, whether the completion was
/// observed live by the foreground tick or reconstructed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub completed_mode: TimerMode,
    pub duration_minutes: u32,
}

/// Fire-and-forget notification payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// Messages exchanged between the background and foreground contexts
///
/// Delivery is at-most-once with no ordering guarantee; an absent receiver
/// simply misses the event and discovers the outcome via reconciliation on
/// its next attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimerEvent {
    AlarmFired,
    Completed(CompletionEvent),
}
