//! host-forwarder
//!
//! Copies the `Host` header of a request into `X-Forwarded-Host`.
//!
//! # Modes
//!
//! ```text
//!   handle:  event JSON (file/stdin) ─▶ HeaderForwarder ─▶ request JSON (stdout)
//!
//!   serve:   client ─▶ trace ─▶ request id ─▶ timeout ─▶ forwarded host ─▶ echo
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use host_forwarder::config::{load_config, ServiceConfig};
use host_forwarder::edge::{encode_request, read_event};
use host_forwarder::lifecycle::{wait_for_signal, Shutdown};
use host_forwarder::observability::{logging, metrics};
use host_forwarder::HttpServer;

#[derive(Parser)]
#[command(name = "host-forwarder", version)]
#[command(about = "Copies the Host header into X-Forwarded-Host", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the handler over one viewer-request event and print the request
    Handle {
        /// Event JSON file; stdin when omitted
        #[arg(short, long)]
        event: Option<PathBuf>,
    },
    /// Serve HTTP, echoing each request after forwarding
    Serve {
        /// Overrides listener.bind_address
        #[arg(short, long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);

    match cli.command {
        Commands::Handle { event } => handle(&config, event),
        Commands::Serve { bind } => serve(config, bind).await,
    }
}

fn handle(config: &ServiceConfig, event: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let event = match event {
        Some(path) => read_event(File::open(path)?)?,
        None => read_event(io::stdin().lock())?,
    };

    let request = config.forwarding.forwarder().handle(event);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", encode_request(&request)?)?;
    Ok(())
}

async fn serve(
    mut config: ServiceConfig,
    bind: Option<SocketAddr>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(bind) = bind {
        config.listener.bind_address = bind.to_string();
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        empty_host = ?config.forwarding.empty_host,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
