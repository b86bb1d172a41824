//! jadwal-gateway: WhatsApp Booking Gateway Main Binary
//!
//! Receives UltraMsg webhooks, books futsal-court time slots, and replies
//! over WhatsApp.
//!
//! Usage:
//!   jadwal-gateway           - Start the webhook server
//!   jadwal-gateway --help    - Show help

use std::net::SocketAddr;
use std::sync::Arc;

use jadwal_core::{Config, ScheduleStore};
use jadwal_whatsapp::{UltraMsgClient, WebhookServer};
use tracing_subscriber::EnvFilter;

/// Run mode
enum RunMode {
    /// Webhook server mode
    Server,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args() {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("jadwal-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    tracing::info!("Starting jadwal-gateway...");
    tracing::info!("Schedule file: {}", config.schedule_path);

    if !config.has_credentials() {
        // The server still starts; sends will fail until the credentials
        // are configured.
        tracing::error!("ULTRAMSG_INSTANCE_ID or ULTRAMSG_TOKEN not set in environment");
    }
    if config.access_token.is_none() {
        tracing::warn!("JADWAL_ACCESS_TOKEN not set, /lihat-jadwal will reject all requests");
    }

    let client = Arc::new(UltraMsgClient::new(
        config.instance_id.clone(),
        config.token.clone(),
    ));
    let store = Arc::new(ScheduleStore::new(&config.schedule_path));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let server = WebhookServer::new(addr, client, store, config.access_token.clone());

    let handle = tokio::spawn(async move {
        if let Err(e) = server.start().await {
            tracing::error!("Webhook server error: {}", e);
        }
    });
    tracing::info!("Webhook server started on port {}", config.port);
    tracing::info!("Press Ctrl+C to exit");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    handle.abort();

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    let args: Vec<String> = std::env::args().collect();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Server
}

/// Print help message
fn print_help() {
    println!("jadwal-gateway - WhatsApp Booking Gateway");
    println!();
    println!("Usage:");
    println!("  jadwal-gateway           Start the webhook server");
    println!("  jadwal-gateway --help    Show this help message");
    println!("  jadwal-gateway --version Show version");
    println!();
    println!("Environment Variables:");
    println!("  ULTRAMSG_INSTANCE_ID UltraMsg instance identifier (required for replies)");
    println!("  ULTRAMSG_TOKEN       UltraMsg API token (required for replies)");
    println!("  JADWAL_ACCESS_TOKEN  Shared secret for GET /lihat-jadwal");
    println!("  JADWAL_PATH          Schedule file path (default: jadwal.json)");
    println!("  PORT                 HTTP listen port (default: 5000)");
}
