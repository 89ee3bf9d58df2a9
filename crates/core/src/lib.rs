//! # FocusTide Core
//!
//! Business logic for the focus timer: the countdown state machine, the
//! reconciliation layer that reconstructs it from persisted snapshots,
//! task tracking, and focus analytics.
//!
//! ## Architecture
//! - Depends on `focustide-domain` and `focustide-common` only
//! - All I/O goes through port traits implemented in `focustide-infra`
//! - Services are `Arc`-shared and internally synchronized

pub mod stats;
pub mod tasks;
pub mod timer;

// Re-export commonly used items
pub use stats::{StatsRepository, StatsService};
pub use tasks::{TaskRepository, TaskService};
pub use timer::{
    completion_notification, CompletionAlarm, CompletionListener, NotificationSink,
    NotifyOnCompletion, Reconciler, SettingsStore, SnapshotStore, TimerEngine,
};
