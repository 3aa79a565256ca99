//! The "auth-changed" synchronization channel.
//!
//! Replaces the browser's ad hoc `storage` + custom-event pair with one
//! explicit publish/subscribe channel: anything that mutates auth state
//! (login, logout, an external actor touching the store) publishes
//! [`AuthEvent::Changed`], and every live session consumer re-resolves from
//! the store on receipt. Delivery is at-least-once for all active
//! subscribers; slow subscribers that lag simply resync on the next receipt.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// Message carried on the channel. The payload is intentionally empty:
/// receivers re-derive state from the store rather than trusting the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    Changed,
}

/// Cloneable handle to the shared channel. All clones publish to and
/// subscribe from the same stream.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    tx: broadcast::Sender<AuthEvent>,
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthEvents {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish to all active subscribers. Publishing with no subscribers is
    /// a no-op, not an error.
    pub fn publish(&self, event: AuthEvent) {
        let _ = self.tx.send(event);
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }
}
