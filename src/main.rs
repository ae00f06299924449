//! Custom error pages: the default backend of an ingress controller.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │              CUSTOM ERROR PAGES              │
//!   Ingress controller    │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!   default-backend hook ─┼─▶│  http   │───▶│ handler │───▶│ resolve  │  │
//!   (X-Code, X-Format)    │  │ server  │    │         │    │ engine   │  │
//!                         │  └─────────┘    └────┬────┘    └────┬─────┘  │
//!                         │                      │              │        │
//!   Error page response   │                      ▼              ▼        │
//!   ◀─────────────────────┼──────────── status + body    TypeTable      │
//!                         │                               ResponseCorpus │
//!                         │                               StatusRemap    │
//!                         │  ┌────────────────────────────────────────┐  │
//!                         │  │ config │ lifecycle │ observability     │  │
//!                         │  └────────────────────────────────────────┘  │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use custom_error_pages::{config, lifecycle, observability, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "custom-error-pages")]
#[command(about = "Default backend serving custom error pages for an ingress controller", long_about = None)]
struct Cli {
    /// TOML configuration file; environment variables override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load the configuration and every table, then exit without serving
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    observability::logging::init(&config.observability, config.debug);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "custom-error-pages starting");

    // Every table is loaded before the listener exists.
    let resolver = match lifecycle::bootstrap(&config) {
        Ok(resolver) => resolver,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    if cli.check {
        tracing::info!("Configuration check passed");
        return Ok(());
    }

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        observability::metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        health_path = %config.listener.health_path,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    lifecycle::signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, resolver);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
