//! Dealwire Server
//!
//! Relays deal events from an automation pipeline to connected operators
//! in real time and arbitrates the single irrevocable claim per deal.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::ConfigLoader;
use dealwire_core::events::{announcement_channel, deal_claimed_channel};
use dealwire_core::processors::{RetentionSweeper, WebhookSender};
use dealwire_core::service::DealService;
use dealwire_core::store::DealStore;
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Dealwire - real-time deal relay and claim server
#[derive(Parser, Debug)]
#[command(name = "dealwire-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./dealwire-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting dealwire-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = Arc::new(ConfigLoader::new(&args.config, args.listen));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = loaded_config.server.listen;
    let retention = loaded_config.retention;
    tracing::info!("Configuration loaded from {:?}", args.config);

    if loaded_config.webhook.claim_url.is_none() {
        tracing::warn!("no claim webhook configured, accepted deals will not notify downstream");
    }

    // Convert to shared config with separate locks for each section
    let shared_config = loaded_config.into_shared();

    // Store, event channels, lifecycle controller
    let store = Arc::new(DealStore::new());
    let announcements = announcement_channel();
    let (claimed_tx, claimed_rx) = deal_claimed_channel();
    let service = Arc::new(DealService::new(
        store.clone(),
        announcements.clone(),
        claimed_tx,
    ));

    // Background processors share one shutdown watch channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let webhook_sender = WebhookSender::new(
        shared_config.webhook.clone(),
        claimed_rx,
        shutdown_rx.clone(),
    );
    let webhook_handle = tokio::spawn(webhook_sender.run());

    let sweeper = RetentionSweeper::new(
        store.clone(),
        retention.horizon,
        retention.sweep_interval,
        shutdown_rx,
    );
    let sweeper_handle = tokio::spawn(sweeper.run());

    // Create application state
    let state = AppState::new(service, announcements, shared_config);

    // Spawn config reload handler (listens for SIGHUP)
    let reload_shutdown = spawn_config_reload_handler(state.clone(), config_loader);

    // Build the router
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Signal the background tasks to stop and wait for them
    reload_shutdown.notify_one();
    let _ = shutdown_tx.send(true);
    let _ = webhook_handle.await;
    let _ = sweeper_handle.await;

    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
