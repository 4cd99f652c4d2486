//! Connection lifecycle tracking.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Count live connections so shutdown can wait for them to drain

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Relaxed ordering is enough, only uniqueness matters.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Tracks active connections for graceful shutdown.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    active_count: Arc<AtomicU64>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new active connection. Returns a guard that decrements on drop.
    pub fn track(&self) -> ConnectionGuard {
        self.active_count.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            active_count: Arc::clone(&self.active_count),
            id: ConnectionId::new(),
        }
    }

    pub fn active_count(&self) -> u64 {
        self.active_count.load(Ordering::SeqCst)
    }

    /// Wait until all connections are closed or the deadline passes.
    ///
    /// Returns `true` if every connection finished in time.
    pub async fn wait_for_drain(&self, deadline: Duration) -> bool {
        let drained = async {
            while self.active_count() > 0 {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
        };
        tokio::time::timeout(deadline, drained).await.is_ok()
    }
}

/// Guard that tracks a connection's lifetime.
#[derive(Debug)]
pub struct ConnectionGuard {
    active_count: Arc<AtomicU64>,
    id: ConnectionId,
}

impl ConnectionGuard {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.active_count.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(connection_id = %self.id, "Connection closed");
    }
}
