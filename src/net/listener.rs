//! TCP listener implementation with backpressure.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming TCP connections
//! - Enforce max_connections limit via semaphore

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    Bind(std::io::Error),
    /// Failed to accept connection.
    #[error("Failed to accept: {0}")]
    Accept(std::io::Error),
    /// The connection limiter was closed.
    #[error("Connection limiter closed")]
    Closed,
}

/// A bounded TCP listener that limits concurrent connections.
///
/// Uses a semaphore to enforce `max_connections`. When the limit is reached,
/// new connections wait in the kernel backlog until a slot becomes available.
pub struct Listener {
    inner: TcpListener,
    connection_limit: Arc<Semaphore>,
    max_connections: usize,
}

impl Listener {
    /// Bind to the configured address with connection limits.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
            ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

        let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;
        Ok(Self::from_tcp(listener, config.max_connections))
    }

    /// Wrap an already bound socket.
    pub fn from_tcp(listener: TcpListener, max_connections: usize) -> Self {
        if let Ok(local_addr) = listener.local_addr() {
            tracing::info!(
                address = %local_addr,
                max_connections,
                "Listener bound"
            );
        }

        Self {
            inner: listener,
            connection_limit: Arc::new(Semaphore::new(max_connections)),
            max_connections,
        }
    }

    /// Accept a new connection, respecting the connection limit.
    ///
    /// Returns the stream and a permit that must be held for the connection's lifetime.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr, ConnectionPermit), ListenerError> {
        // Acquire permit first (backpressure)
        let permit = self
            .connection_limit
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ListenerError::Closed)?;

        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        tracing::debug!(
            peer_addr = %addr,
            available_permits = self.connection_limit.available_permits(),
            "Connection accepted"
        );

        Ok((stream, addr, ConnectionPermit { _permit: permit }))
    }

    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Get current available connection slots.
    pub fn available_permits(&self) -> usize {
        self.connection_limit.available_permits()
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }
}

/// A permit representing a connection slot.
///
/// When dropped, the slot is released even if the connection task panics.
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: tokio::sync::OwnedSemaphorePermit,
}
