//! Pipeline command-line entry point.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use candlemill_ingest::BinanceClient;
use candlemill_pipeline::{extract, run, transform};
use candlemill_storage::FsObjectStore;
use candlemill_types::PipelineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Fetch klines into raw partitions.
    Extract,
    /// Assemble features from stored raw partitions.
    Transform,
    /// Extract, then transform.
    Full,
}

#[derive(Debug, Parser)]
#[command(name = "candlemill", about = "Candle feature pipeline")]
struct Cli {
    /// Path to a JSON configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stage(s) to run.
    #[arg(long, value_enum, default_value = "full")]
    mode: Mode,

    /// First UTC date to process (inclusive), e.g. 2024-03-01.
    #[arg(long)]
    start_date: NaiveDate,

    /// Last UTC date to process (inclusive); defaults to today.
    #[arg(long)]
    end_date: Option<NaiveDate>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let start_ms = day_start_ms(cli.start_date)?;
    let end_ms = match cli.end_date {
        Some(date) => day_end_ms(date)?,
        None => Utc::now().timestamp_millis(),
    };
    anyhow::ensure!(
        start_ms <= end_ms,
        "start date {} is after end date",
        cli.start_date
    );

    let store = FsObjectStore::new(&config.object_store.root, &config.object_store.bucket);
    let client = BinanceClient::new(config.api_key.clone());

    let summary = match cli.mode {
        Mode::Extract => extract(&store, &client, &config, start_ms, end_ms)?,
        Mode::Transform => transform(&store, &config, start_ms)?,
        Mode::Full => run(&store, &client, &config, start_ms, end_ms)?,
    };

    info!(
        written = summary.written,
        failed = summary.failed,
        "pipeline finished"
    );
    Ok(())
}

fn day_start_ms(date: NaiveDate) -> anyhow::Result<i64> {
    Ok(date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("invalid date {date}"))?
        .and_utc()
        .timestamp_millis())
}

fn day_end_ms(date: NaiveDate) -> anyhow::Result<i64> {
    Ok(date
        .and_hms_milli_opt(23, 59, 59, 999)
        .with_context(|| format!("invalid date {date}"))?
        .and_utc()
        .timestamp_millis())
}
