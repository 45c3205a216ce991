//! # channelpress web server
//!
//! Binds the HTTP frontend. Address comes from `BIND_ADDR` (default
//! `0.0.0.0:8000`); everything else from the same environment variables
//! the CLI reads.

use std::process;

use channelpress::config::AppConfig;
use channelpress::web;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    if config.demo_mode() {
        tracing::warn!("no API credentials configured, serving demo data");
    }

    if let Err(err) = web::serve(config, &addr).await {
        eprintln!("❌ Server error: {err}");
        process::exit(1);
    }
}
