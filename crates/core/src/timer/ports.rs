//! Port interfaces for the timer core
//!
//! These traits define the boundaries between the timer's business logic
//! and infrastructure implementations (persistence, scheduling,
//! notification delivery).

use std::time::Duration;

use async_trait::async_trait;
use focustide_domain::{CompletionEvent, DurationConfig, Notification, Result, TimerSnapshot};

/// Trait for persisting the timer snapshot
///
/// The snapshot is written on every state-affecting transition and read
/// once per foreground attach. Implementations are expected to make a
/// read-your-writes guarantee within a single process; nothing stronger
/// is required.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the last persisted snapshot, if any.
    async fn load_snapshot(&self) -> Result<Option<TimerSnapshot>>;

    /// Replace the persisted snapshot.
    async fn save_snapshot(&self, snapshot: &TimerSnapshot) -> Result<()>;
}

/// Trait for persisting duration settings
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the saved durations, if any have been saved.
    async fn load_durations(&self) -> Result<Option<DurationConfig>>;

    /// Persist the durations.
    async fn save_durations(&self, durations: &DurationConfig) -> Result<()>;
}

/// Trait for the one-shot completion alarm owned by the background context
///
/// The alarm is the durability backstop: it fires exactly once at expected
/// completion even when no foreground view is attached. Firing precision
/// is coarse; the reconciliation math never trusts alarm timing and
/// recomputes elapsed time from wall-clock timestamps instead.
#[async_trait]
pub trait CompletionAlarm: Send + Sync {
    /// Arm the alarm to fire once after `delay`. Re-arming replaces any
    /// pending alarm.
    async fn schedule(&self, delay: Duration) -> Result<()>;

    /// Cancel the pending alarm.
    ///
    /// Must take effect before returning: a completion notification firing
    /// after the user stopped the timer is the one hard real-time bug this
    /// system can have.
    fn cancel(&self);
}

/// Trait for consumers of completion events
///
/// Analytics, notification delivery and the cross-context event bus all
/// hang off this. Listener failures are logged by the engine and never
/// block the state transition.
#[async_trait]
pub trait CompletionListener: Send + Sync {
    /// Called exactly once per completed session.
    async fn on_completion(&self, event: &CompletionEvent) -> Result<()>;
}

/// Trait for fire-and-forget notification delivery
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification. Best effort, no delivery guarantee.
    async fn notify(&self, notification: Notification) -> Result<()>;
}
