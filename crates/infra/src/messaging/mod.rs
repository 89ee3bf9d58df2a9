//! Cross-context event bus
//!
//! The background and foreground contexts never share memory directly;
//! they exchange [`TimerEvent`]s over a tokio broadcast channel. Delivery
//! is at-most-once: an event published with no receiver attached is
//! dropped, and the absent context discovers the outcome through
//! reconciliation on its next attach.

use async_trait::async_trait;
use focustide_core::timer::ports::CompletionListener;
use focustide_domain::constants::EVENT_CHANNEL_CAPACITY;
use focustide_domain::{CompletionEvent, Result, TimerEvent};
use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::{debug, trace};

/// Broadcast hub for timer events
///
/// Cloneable and shareable across tasks; the underlying sender is
/// reference-counted. Slow receivers that fall more than the channel
/// capacity behind start seeing lagged errors, which is acceptable for
/// display-oriented events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Sender<TimerEvent>,
}

impl EventBus {
    /// Create a bus with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    /// Create a bus with a custom capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 (broadcast channels require room for at
    /// least one event).
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> Receiver<TimerEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: TimerEvent) {
        match self.sender.send(event) {
            Ok(receivers) => trace!(receivers, "timer event published"),
            Err(_) => debug!("timer event dropped: no subscribers attached"),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Completions go out on the bus like any other timer event
#[async_trait]
impl CompletionListener for EventBus {
    async fn on_completion(&self, event: &CompletionEvent) -> Result<()> {
        self.publish(TimerEvent::Completed(*event));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use focustide_domain::TimerMode;

    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(TimerEvent::AlarmFired);

        assert_eq!(rx.recv().await.unwrap(), TimerEvent::AlarmFired);
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();

        // No receiver attached; the event is simply dropped.
        bus.publish(TimerEvent::AlarmFired);
    }

    #[tokio::test]
    async fn completion_listener_forwards_onto_the_bus() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let event = CompletionEvent { completed_mode: TimerMode::Focus, duration_minutes: 25 };

        bus.on_completion(&event).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), TimerEvent::Completed(event));
    }

    #[tokio::test]
    async fn late_subscribers_miss_earlier_events() {
        let bus = EventBus::new();
        bus.publish(TimerEvent::AlarmFired);

        let mut rx = bus.subscribe();
        bus.publish(TimerEvent::AlarmFired);

        // Only the event published after subscribing arrives.
        assert_eq!(rx.recv().await.unwrap(), TimerEvent::AlarmFired);
        assert!(rx.try_recv().is_err());
    }
}
