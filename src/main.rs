//! Application entry point for the `hvac-telemetry-sim` generator.
//!
//! This binary orchestrates one batch run, including:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Reading the INMET climate export (`.csv` or `.zip`)
//! - Running the HVAC simulation over every hourly record
//! - Encoding the telemetry and persisting it locally or to a bucket
//!
//! # Environment Variables
//! - `CLIMATE_INPUT_PATH` (optional) – climate source file
//! - `SINK` (optional) – `local` (default) or `s3`
//! - `S3_BUCKET_NAME` (**required** for `s3`) – target bucket
//! - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` (**required** for AWS) – request signing
//! - `HVAC_LOG_LEVEL` (optional) – log verbosity (default: `info`)
//! - `HVAC_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! See `config.rs` for the complete list.
use std::env;

use anyhow::Result;
use chrono::Utc;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use hvac_telemetry_sim::{config, pipeline};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let report = pipeline::run(&cfg, Utc::now()).await?;

    match report.location {
        Some(location) => tracing::info!(
            "Run complete: {} records saved to {}",
            report.summary.records,
            location
        ),
        None => tracing::info!("Run complete: no records generated"),
    }

    Ok(())
}

// ---

/// Install the compact `tracing` subscriber used by the generator run.
///
/// The run is a single batch, so the interesting output is the per-step `info`
/// lines from the pipeline plus `warn` for skipped climate rows. Knobs:
/// - `RUST_LOG` wins when set; otherwise `HVAC_LOG_LEVEL` picks the level for
///   this crate, with `hyper` and `reqwest` held at `warn` so uploads stay quiet
/// - `HVAC_SPAN_EVENTS=full|enter_exit` adds span events (close-only by default)
/// - `FORCE_COLOR` forces ANSI on or off; unset, it follows whether stdout is a
///   terminal, so redirected runs produce plain logs
fn init_tracing() {
    // ---
    let span_events = match env::var("HVAC_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = env::var("HVAC_LOG_LEVEL")
            .ok()
            .map(|level| level.trim().to_ascii_lowercase())
            .filter(|level| matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error"))
            .unwrap_or_else(|| "info".to_string());
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
