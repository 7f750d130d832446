//! Pipeline stages.
//!
//! `extract` pulls klines from the exchange into raw partitions;
//! `transform` reads raw candles back, assembles the feature table and
//! writes processed partitions. Both stages are idempotent: re-running
//! them overwrites the affected partitions.

use tracing::info;

use candlemill_features::{FeatureParams, assemble_features};
use candlemill_ingest::BinanceClient;
use candlemill_storage::{
    ObjectStore, WriteSummary, ensure_bucket, read_raw_since, write_feature_partitions,
    write_raw_partitions,
};
use candlemill_types::PipelineConfig;

use crate::error::PipelineError;

/// Fetches klines for `[start_ms, end_ms]` and writes raw partitions.
///
/// # Errors
/// - [`PipelineError::Ingest`] when the exchange fetch fails.
/// - [`PipelineError::Storage`] when partition grouping fails.
pub fn extract(
    store: &dyn ObjectStore,
    client: &BinanceClient,
    config: &PipelineConfig,
    start_ms: i64,
    end_ms: i64,
) -> Result<WriteSummary, PipelineError> {
    ensure_bucket(store)?;

    info!(
        symbol = %config.symbol,
        interval = %config.interval,
        start_ms,
        end_ms,
        "extracting klines"
    );
    let candles = client.fetch_klines(&config.symbol, &config.interval, start_ms, end_ms)?;
    info!(rows = candles.len(), "fetched candles");

    Ok(write_raw_partitions(store, &candles)?)
}

/// Reads raw candles from `start_ms` onward, assembles features and
/// writes processed partitions.
///
/// # Errors
/// - [`PipelineError::NoRawData`] when no raw candles exist in range.
/// - [`PipelineError::Feature`] when assembly fails (corrupt or
///   insufficient data).
/// - [`PipelineError::Storage`] on read or write failure.
pub fn transform(
    store: &dyn ObjectStore,
    config: &PipelineConfig,
    start_ms: i64,
) -> Result<WriteSummary, PipelineError> {
    let candles = read_raw_since(store, start_ms)?;
    if candles.is_empty() {
        return Err(PipelineError::NoRawData { start_ms });
    }
    info!(rows = candles.len(), "assembling features");

    let params = FeatureParams {
        window: config.feature_window,
        shift: config.shift,
        bollinger_std_factor: config.bollinger_std_factor,
    };
    let frame = assemble_features(&candles, &params)?;

    Ok(write_feature_partitions(store, &frame)?)
}

/// Runs `extract` followed by `transform` over the same window.
///
/// # Errors
/// Propagates stage errors; see [`extract`] and [`transform`].
pub fn run(
    store: &dyn ObjectStore,
    client: &BinanceClient,
    config: &PipelineConfig,
    start_ms: i64,
    end_ms: i64,
) -> Result<WriteSummary, PipelineError> {
    extract(store, client, config, start_ms, end_ms)?;
    transform(store, config, start_ms)
}
