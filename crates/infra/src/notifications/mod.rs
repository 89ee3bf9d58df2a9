//! Notification delivery
//!
//! Notification display is an external collaborator. In headless runs the
//! structured log is the delivery channel; UI collaborators that want
//! visible notifications subscribe to the event bus and render the
//! completion themselves.

use async_trait::async_trait;
use focustide_core::timer::ports::NotificationSink;
use focustide_domain::{Notification, Result};
use tracing::info;

/// Notification sink that writes to the structured log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl NotificationSink for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<()> {
        info!(
            title = %notification.title,
            message = %notification.message,
            "notification"
        );
        Ok(())
    }
}
