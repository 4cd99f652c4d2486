//! HTTP server setup and the accept loop.
//!
//! # Responsibilities
//! - Create the Axum router with the route table and middleware
//! - Serve each accepted connection (HTTP/1.1 and HTTP/2) on its own task
//! - Log connection-level failures without stopping the listener
//! - Stop accepting on shutdown and drain in-flight connections

use std::net::SocketAddr;
use std::time::Duration;

use axum::{middleware, Router};
use hyper::body::Incoming;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
};
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::middleware::buffer_body;
use crate::net::{ConnectionGuard, ConnectionPermit, ConnectionTracker, Listener, ListenerError};

/// Pause after a failed accept so a persistent error (e.g. EMFILE) cannot spin.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Application state injected into middleware.
#[derive(Clone, Debug)]
pub struct AppState {
    pub max_body_bytes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the greeter service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState {
            max_body_bytes: config.limits.max_body_bytes,
        };
        let router = Self::build_router(state);
        Self { router, config }
    }

    fn build_router(state: AppState) -> Router {
        handlers::routes()
            .route_layer(middleware::from_fn_with_state(state, buffer_body))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain open connections.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let tracker = ConnectionTracker::new();

        loop {
            let accepted = tokio::select! {
                accepted = listener.accept() => accepted,
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, no longer accepting connections");
                    break;
                }
            };

            match accepted {
                Ok((stream, peer, permit)) => {
                    let guard = tracker.track();
                    tokio::spawn(serve_connection(
                        stream,
                        peer,
                        self.router.clone(),
                        permit,
                        guard,
                        shutdown.resubscribe(),
                    ));
                }
                Err(ListenerError::Closed) => break,
                Err(e) => {
                    tracing::error!(error = %e, "connection error");
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                }
            }
        }
        drop(listener);

        let deadline = Duration::from_secs(self.config.shutdown.drain_timeout_secs);
        if tracker.wait_for_drain(deadline).await {
            tracing::info!("All connections drained");
        } else {
            tracing::warn!(
                remaining = tracker.active_count(),
                "Drain deadline passed, abandoning open connections"
            );
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Serve one connection until the peer is done or shutdown asks it to finish.
async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    router: Router,
    _permit: ConnectionPermit,
    guard: ConnectionGuard,
    mut shutdown: broadcast::Receiver<()>,
) {
    let io = TokioIo::new(stream);
    let service = hyper::service::service_fn(move |request: hyper::Request<Incoming>| {
        router.clone().oneshot(request)
    });

    let builder = auto::Builder::new(TokioExecutor::new());
    let conn = builder.serve_connection(io, service);
    tokio::pin!(conn);

    let mut shutting_down = false;
    let result = loop {
        tokio::select! {
            result = conn.as_mut() => break result,
            _ = shutdown.recv(), if !shutting_down => {
                shutting_down = true;
                conn.as_mut().graceful_shutdown();
            }
        }
    };

    if let Err(e) = result {
        tracing::error!(
            connection_id = %guard.id(),
            peer_addr = %peer,
            error = %e,
            "connection error"
        );
    }
}
