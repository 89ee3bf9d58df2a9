//! Timer state machine and reconciliation

pub mod engine;
pub mod notify;
pub mod ports;
pub mod reconcile;

pub use engine::TimerEngine;
pub use notify::{completion_notification, NotifyOnCompletion};
pub use ports::{
    CompletionAlarm, CompletionListener, NotificationSink, SettingsStore, SnapshotStore,
};
pub use reconcile::Reconciler;
