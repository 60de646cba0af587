//! Wonders API server binary
//!
//! # Usage
//! ```bash
//! wonders-server [--port 8080] [--host 127.0.0.1] [--seed-path seed-data.json] [--verbose]
//! ```

use clap::Parser;
use wonders_server::{ServerConfig, WondersServer, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SEED_PATH};

/// Wonders API - CRUD and random selection over a catalog of landmarks
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Path to the JSON seed file (missing file starts an empty catalog)
    #[arg(long, default_value = DEFAULT_SEED_PATH)]
    seed_path: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_target(false)
            .init();
    }

    let config = ServerConfig::default()
        .with_host(args.host)
        .with_port(args.port)
        .with_seed_path(args.seed_path);

    let server = WondersServer::new(config);
    server.start().await?;

    Ok(())
}
