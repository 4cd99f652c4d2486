//! Greeter service
//!
//! ```text
//!     Client ──▶ net::Listener ──▶ hyper connection ──▶ axum Router
//!                                                        ├── GET /         "Hello!"
//!                                                        ├── GET /goaway   "Go!"
//!                                                        └── GET /reflect  {"headers": {...}}
//! ```

use std::path::PathBuf;

use clap::Parser;

use greeter_service::config::{load_config, ServiceConfig};
use greeter_service::lifecycle::{wait_for_signal, Shutdown};
use greeter_service::net::Listener;
use greeter_service::observability::init_logging;
use greeter_service::HttpServer;

#[derive(Parser)]
#[command(name = "greeter-service")]
#[command(about = "Greeting, easter egg and header reflection over plain HTTP", long_about = None)]
struct Cli {
    /// Optional TOML config file; built-in defaults bind 0.0.0.0:80
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    init_logging(&config.observability);

    tracing::info!("greeter-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        "Configuration loaded"
    );

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
