//! Completion notifications
//!
//! Maps a completed session to the notification shown to the user and
//! adapts the notification sink onto the engine's listener interface.

use std::sync::Arc;

use async_trait::async_trait;
use focustide_domain::{CompletionEvent, Notification, Result, TimerMode};

use super::ports::{CompletionListener, NotificationSink};

/// Notification content for a completed session of `mode`.
pub fn completion_notification(mode: TimerMode) -> Notification {
    match mode {
        TimerMode::Focus => Notification {
            title: "Focus Session Complete!".to_string(),
            message: "Great job! Time for a well-deserved break.".to_string(),
        },
        TimerMode::ShortBreak => Notification {
            title: "Break Time Over".to_string(),
            message: "Ready to get back to focused work?".to_string(),
        },
        TimerMode::LongBreak => Notification {
            title: "Long Break Complete".to_string(),
            message: "Refreshed and ready for the next session!".to_string(),
        },
    }
}

/// Listener that forwards completions to the notification sink
pub struct NotifyOnCompletion {
    sink: Arc<dyn NotificationSink>,
}

impl NotifyOnCompletion {
    /// Wrap a notification sink as a completion listener.
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl CompletionListener for NotifyOnCompletion {
    async fn on_completion(&self, event: &CompletionEvent) -> Result<()> {
        self.sink.notify(completion_notification(event.completed_mode)).await
    }
}
