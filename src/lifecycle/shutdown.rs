//! Shutdown coordination for the service.
//!
//! One trigger fans out twice: the accept loop stops taking connections,
//! and each live connection (holding a resubscribed receiver) switches
//! hyper into graceful shutdown so in-flight requests still finish.

use tokio::sync::broadcast;

/// Fan-out of the termination signal.
///
/// The server subscribes once; connection tasks get `resubscribe()` copies of that receiver.
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
