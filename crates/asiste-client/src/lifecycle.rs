//! Session lifecycle broadcast.
//!
//! Stateful consumers (feature-level state holders) subscribe once and
//! reset themselves when a logout is published, instead of being tracked in
//! a hand-maintained global registry.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedOut,
}

/// Publish/subscribe channel for session lifecycle events.
#[derive(Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Announces a completed logout. A missing audience is fine; the event
    /// is simply dropped.
    pub fn publish_logged_out(&self) {
        let _ = self.sender.send(SessionEvent::LoggedOut);
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_logout() {
        let events = SessionEvents::new();
        let mut first = events.subscribe();
        let mut second = events.subscribe();

        events.publish_logged_out();

        assert_eq!(first.recv().await.unwrap(), SessionEvent::LoggedOut);
        assert_eq!(second.recv().await.unwrap(), SessionEvent::LoggedOut);
    }

    #[test]
    fn test_publish_without_subscribers_is_a_no_op() {
        let events = SessionEvents::new();
        events.publish_logged_out();
    }
}
