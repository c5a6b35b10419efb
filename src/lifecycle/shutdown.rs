//! Shutdown coordination for the server.
//!
//! # Design Decisions
//! - One broadcast channel; every long-running task holds a receiver
//! - Triggering is fire-and-forget, with no acknowledgement from tasks
//! - Cloning the coordinator shares the same channel

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// The signal task triggers it; `HttpServer::run` subscribes and drains
/// in-flight requests once the signal arrives.
#[derive(Debug, Clone)]
pub struct Shutdown {
    /// Broadcast channel sender. Capacity 1: only the first trigger matters.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a coordinator with no subscribers yet.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Get a receiver that resolves once [`Shutdown::trigger`] is called.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Subscribers created afterwards will not see it.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of receivers still alive.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
