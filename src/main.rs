//! # channelpress CLI
//!
//! Interactive terminal frontend: prompts for the report parameters, runs
//! the pipeline and prints the artifact path. Exit code 0 on success and
//! on the "no posts in that window" outcome, 1 on every other error.

use std::io;
use std::process;

use clap::Parser;

use channelpress::cli::{Args, prompt_request};
use channelpress::config::AppConfig;
use channelpress::core::generate_report;
use channelpress::error::ReportError;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env().with_output_dir(&args.output_dir);
    if args.demo {
        config = config.with_force_demo(true);
    }

    match run(&config).await {
        Ok(()) => {}
        Err(e) if e.is_empty_result() => {
            println!();
            println!("{e}");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("❌ Error: {e}");
            process::exit(1);
        }
    }
}

async fn run(config: &AppConfig) -> Result<(), ReportError> {
    let demo_mode = config.demo_mode();

    println!("📰 channelpress v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if demo_mode {
        println!("⚠️  Demo mode: no API credentials configured.");
        println!("   The report will use canned sample posts.");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let request = prompt_request(&mut input, &mut output, demo_mode)
        .map_err(|e| ReportError::invalid_parameter(e.to_string()))?;

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if demo_mode {
        println!("🧪 Generating demo data...");
    } else {
        println!("📡 Connecting to Telegram and fetching posts...");
    }
    println!("   Channel: {}", request.channel);
    println!("   Window:  {} to {}", request.date_from, request.date_to);
    println!(
        "   Sorting: by {} ({})",
        request.sort_key.label(),
        if request.ascending { "ascending" } else { "descending" }
    );
    println!();

    let path = dispatch(config, &request).await?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✅ Done!");
    println!("📄 Report written to: {}", path.display());
    if demo_mode {
        println!();
        println!("ℹ️  This was demo data. Set API_ID and API_HASH to export");
        println!("   real channels.");
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    Ok(())
}

#[cfg(feature = "live")]
async fn dispatch(
    config: &AppConfig,
    request: &channelpress::core::ReportRequest,
) -> Result<std::path::PathBuf, ReportError> {
    let source = channelpress::source::telegram::TelegramSource::new(config.clone());
    generate_report(config, &source, request).await
}

#[cfg(not(feature = "live"))]
async fn dispatch(
    config: &AppConfig,
    request: &channelpress::core::ReportRequest,
) -> Result<std::path::PathBuf, ReportError> {
    generate_report(config, &channelpress::source::DisabledSource, request).await
}
