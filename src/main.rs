//! CLI entry point.
//!
//! Runs the selected preset finders (all of them by default) to exhaustion
//! and prints each yielded record as one JSON line on stdout. Logs go to
//! stderr so the output stream stays machine-readable.

use clap::Parser;
use std::error::Error;
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

use reddit_media_finder::cli::Cli;
use reddit_media_finder::config::Credentials;
use reddit_media_finder::finder::Finder;
use reddit_media_finder::models::{ALL_PRESETS, MediaRecord, Preset};

fn print_record(record: &MediaRecord) {
    match serde_json::to_string(record) {
        Ok(json) => println!("{json}"),
        Err(e) => error!(error = %e, "Failed to serialize record"),
    }
}

async fn run_preset(preset: Preset, args: &Cli) -> Result<usize, Box<dyn Error>> {
    let config = preset.config();

    // --cached stays fully offline: no source adapter, no token request
    let records = if args.cached {
        Finder::cached_records(&config)
    } else {
        let credentials = Credentials {
            client: args.client_id.clone(),
            secret: args.client_secret.clone(),
        };
        let mut finder = Finder::new(config, credentials).await?;
        finder.scrap(args.max, !args.no_store).await?
    };

    for record in &records {
        print_record(record);
    }
    Ok(records.len())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();

    let presets: Vec<Preset> = match args.preset {
        Some(preset) => vec![preset],
        None => ALL_PRESETS.to_vec(),
    };
    info!(count = presets.len(), cached = args.cached, "Starting up");

    let mut total = 0usize;
    for preset in presets {
        info!(?preset, "Running preset finder");
        total += run_preset(preset, &args).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        total,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
