//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use greeter_service::config::{ListenerConfig, ServiceConfig};
use greeter_service::http::ServerError;
use greeter_service::lifecycle::Shutdown;
use greeter_service::net::Listener;
use greeter_service::HttpServer;
use tokio::task::JoinHandle;

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the service with defaults, bound to 127.0.0.1:0.
pub async fn start_server() -> TestServer {
    let mut config = ServiceConfig::default();
    config.listener = ListenerConfig {
        bind_address: "127.0.0.1:0".to_string(),
        max_connections: 64,
    };
    config.shutdown.drain_timeout_secs = 2;
    start_server_with(config).await
}

pub async fn start_server_with(config: ServiceConfig) -> TestServer {
    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    // Give the accept loop a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer { addr, shutdown, handle }
}

/// A client that never reuses connections, so tests do not interfere.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
