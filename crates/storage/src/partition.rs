//! Partitioned write and date-filtered read operations.
//!
//! Writes group input rows by [`PartitionKey`] and upload one parquet
//! blob per partition. A failing partition is logged and counted but
//! never aborts the batch; re-running a write simply overwrites the
//! affected objects (last-write-wins). Reads list by prefix, skip
//! partitions dated before the requested start, and return rows
//! filtered and sorted by open time.

use std::collections::BTreeMap;

use candlemill_features::{columns, FeatureFrame};
use candlemill_types::Candle;
use tracing::{debug, info, warn};

use crate::codec::{
    candles_from_parquet, candles_to_parquet, frame_from_parquet, frame_to_parquet,
};
use crate::error::StorageError;
use crate::key::{PartitionKey, PROCESSED_PREFIX, RAW_PREFIX};
use crate::store::ObjectStore;

/// Outcome counts of a partitioned write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    /// Partitions uploaded successfully.
    pub written: usize,
    /// Partitions that failed to encode or upload.
    pub failed: usize,
}

/// Creates the bucket when it does not exist yet.
///
/// # Errors
/// Backend-specific failures.
pub fn ensure_bucket(store: &dyn ObjectStore) -> Result<(), StorageError> {
    if store.bucket_exists()? {
        debug!("bucket already exists");
    } else {
        info!("creating bucket");
        store.create_bucket()?;
    }
    Ok(())
}

/// Writes candles to raw partitions, one `data.parquet` per date/hour.
///
/// A partition that fails to encode or upload is logged and counted in
/// the summary; the remaining partitions are still written.
///
/// # Errors
/// - [`StorageError::InvalidTimestamp`] when a candle's open time does
///   not map to a valid UTC instant.
pub fn write_raw_partitions(
    store: &dyn ObjectStore,
    candles: &[Candle],
) -> Result<WriteSummary, StorageError> {
    let mut groups: BTreeMap<PartitionKey, Vec<Candle>> = BTreeMap::new();
    for candle in candles {
        let key = PartitionKey::from_open_time_ms(candle.open_time_ms)?;
        groups.entry(key).or_default().push(*candle);
    }

    let mut summary = WriteSummary::default();
    for (key, group) in &groups {
        match candles_to_parquet(group).and_then(|blob| store.put(&key.raw_object(), &blob)) {
            Ok(()) => {
                debug!(partition = %key, rows = group.len(), "wrote raw partition");
                summary.written += 1;
            }
            Err(e) => {
                warn!(partition = %key, error = %e, "failed to write raw partition");
                summary.failed += 1;
            }
        }
    }

    info!(
        written = summary.written,
        failed = summary.failed,
        "raw write complete"
    );
    Ok(summary)
}

/// Writes a feature frame to processed partitions, one
/// `features.parquet` per date/hour of the frame's open-time column.
///
/// Failure handling matches [`write_raw_partitions`].
///
/// # Errors
/// - [`StorageError::Frame`] when the frame lacks an Int64 open-time
///   column.
/// - [`StorageError::InvalidTimestamp`] when an open time does not map
///   to a valid UTC instant.
pub fn write_feature_partitions(
    store: &dyn ObjectStore,
    frame: &FeatureFrame,
) -> Result<WriteSummary, StorageError> {
    let open_times = frame.i64s(columns::OPEN_TIME).map_err(StorageError::Frame)?;

    let mut groups: BTreeMap<PartitionKey, Vec<usize>> = BTreeMap::new();
    for (row, &open_time_ms) in open_times.iter().enumerate() {
        let key = PartitionKey::from_open_time_ms(open_time_ms)?;
        groups.entry(key).or_default().push(row);
    }

    let mut summary = WriteSummary::default();
    for (key, rows) in &groups {
        let part = frame.select_rows(rows);
        match frame_to_parquet(&part).and_then(|blob| store.put(&key.features_object(), &blob)) {
            Ok(()) => {
                debug!(partition = %key, rows = rows.len(), "wrote feature partition");
                summary.written += 1;
            }
            Err(e) => {
                warn!(partition = %key, error = %e, "failed to write feature partition");
                summary.failed += 1;
            }
        }
    }

    info!(
        written = summary.written,
        failed = summary.failed,
        "feature write complete"
    );
    Ok(summary)
}

/// Reads all raw candles with `open_time_ms >= start_ms`, sorted by
/// open time. Missing data is not an error; the result may be empty.
///
/// # Errors
/// - [`StorageError::InvalidTimestamp`] when `start_ms` is out of range.
/// - Decode or backend failures.
pub fn read_raw_since(
    store: &dyn ObjectStore,
    start_ms: i64,
) -> Result<Vec<Candle>, StorageError> {
    let start_date = PartitionKey::from_open_time_ms(start_ms)?.date;

    let mut candles = Vec::new();
    for object in store.list(RAW_PREFIX)? {
        if PartitionKey::parse_date(&object).is_none_or(|date| date < start_date) {
            continue;
        }
        let Some(blob) = store.get(&object)? else {
            continue;
        };
        candles.extend(candles_from_parquet(&blob)?);
    }

    candles.retain(|c| c.open_time_ms >= start_ms);
    candles.sort_by_key(|c| c.open_time_ms);
    debug!(rows = candles.len(), "raw read complete");
    Ok(candles)
}

/// Reads all feature rows with open time `>= start_ms`, sorted by open
/// time. Missing data yields an empty frame.
///
/// # Errors
/// - [`StorageError::InvalidTimestamp`] when `start_ms` is out of range.
/// - [`StorageError::Frame`] when stored partitions disagree on schema.
/// - Decode or backend failures.
pub fn read_features_since(
    store: &dyn ObjectStore,
    start_ms: i64,
) -> Result<FeatureFrame, StorageError> {
    let start_date = PartitionKey::from_open_time_ms(start_ms)?.date;

    let mut frames = Vec::new();
    for object in store.list(PROCESSED_PREFIX)? {
        if PartitionKey::parse_date(&object).is_none_or(|date| date < start_date) {
            continue;
        }
        let Some(blob) = store.get(&object)? else {
            continue;
        };
        frames.push(frame_from_parquet(&blob)?);
    }

    let merged = FeatureFrame::concat(&frames)?;
    if merged.is_empty() {
        return Ok(merged);
    }

    let open_times = merged.i64s(columns::OPEN_TIME)?;
    let keep: Vec<usize> = open_times
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t >= start_ms)
        .map(|(row, _)| row)
        .collect();
    let filtered = merged.select_rows(&keep);

    let sorted = filtered.sorted_by_i64(columns::OPEN_TIME)?;
    debug!(rows = sorted.len(), "feature read complete");
    Ok(sorted)
}
