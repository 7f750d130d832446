//! Parquet encode/decode.
//!
//! Each partition is one self-contained parquet blob. All numeric and
//! timestamp columns round-trip losslessly; NaN entries in Float64
//! feature columns are stored as parquet nulls and restored as NaN.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;

use candlemill_features::{Column, FeatureFrame};
use candlemill_types::Candle;

use crate::error::StorageError;

const OPEN_TIME: &str = "open_time";
const CLOSE_TIME: &str = "close_time";
const OPEN: &str = "open";
const HIGH: &str = "high";
const LOW: &str = "low";
const CLOSE: &str = "close";
const VOLUME: &str = "volume";
const QUOTE_VOLUME: &str = "quote_volume";
const TRADES: &str = "trades";
const TAKER_BUY_BASE_VOLUME: &str = "taker_buy_base_volume";
const TAKER_BUY_QUOTE_VOLUME: &str = "taker_buy_quote_volume";

/// Encodes candles into a parquet blob with schema:
/// `open_time`/`close_time` (timestamp ms UTC), `trades` (Int64), and
/// Float64 price/volume columns.
///
/// # Errors
/// - [`StorageError::Arrow`] / [`StorageError::Parquet`] on encoding failure.
pub fn candles_to_parquet(candles: &[Candle]) -> Result<Vec<u8>, StorageError> {
    let fields = vec![
        timestamp_field(OPEN_TIME),
        timestamp_field(CLOSE_TIME),
        Field::new(OPEN, DataType::Float64, false),
        Field::new(HIGH, DataType::Float64, false),
        Field::new(LOW, DataType::Float64, false),
        Field::new(CLOSE, DataType::Float64, false),
        Field::new(VOLUME, DataType::Float64, false),
        Field::new(QUOTE_VOLUME, DataType::Float64, false),
        Field::new(TRADES, DataType::Int64, false),
        Field::new(TAKER_BUY_BASE_VOLUME, DataType::Float64, false),
        Field::new(TAKER_BUY_QUOTE_VOLUME, DataType::Float64, false),
    ];

    let columns: Vec<ArrayRef> = vec![
        Arc::new(
            TimestampMillisecondArray::from(
                candles.iter().map(|c| c.open_time_ms).collect::<Vec<_>>(),
            )
            .with_timezone("UTC"),
        ),
        Arc::new(
            TimestampMillisecondArray::from(
                candles.iter().map(|c| c.close_time_ms).collect::<Vec<_>>(),
            )
            .with_timezone("UTC"),
        ),
        float_array(candles, |c| c.open),
        float_array(candles, |c| c.high),
        float_array(candles, |c| c.low),
        float_array(candles, |c| c.close),
        float_array(candles, |c| c.volume),
        float_array(candles, |c| c.quote_volume),
        Arc::new(Int64Array::from(
            candles.iter().map(|c| c.trades).collect::<Vec<_>>(),
        )),
        float_array(candles, |c| c.taker_buy_base_volume),
        float_array(candles, |c| c.taker_buy_quote_volume),
    ];

    write_parquet(fields, columns)
}

/// Decodes candles from a parquet blob written by [`candles_to_parquet`].
///
/// # Errors
/// - [`StorageError::MissingColumn`] / [`StorageError::InvalidColumnType`]
///   when the schema does not match.
/// - [`StorageError::Parquet`] on decoding failure.
pub fn candles_from_parquet(data: &[u8]) -> Result<Vec<Candle>, StorageError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(data.to_vec()))?;
    let reader = builder.build()?;

    let mut candles = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;

        let open_time = timestamp_column(&batch, OPEN_TIME)?;
        let close_time = timestamp_column(&batch, CLOSE_TIME)?;
        let open = float_column(&batch, OPEN)?;
        let high = float_column(&batch, HIGH)?;
        let low = float_column(&batch, LOW)?;
        let close = float_column(&batch, CLOSE)?;
        let volume = float_column(&batch, VOLUME)?;
        let quote_volume = float_column(&batch, QUOTE_VOLUME)?;
        let trades = int_column(&batch, TRADES)?;
        let taker_base = float_column(&batch, TAKER_BUY_BASE_VOLUME)?;
        let taker_quote = float_column(&batch, TAKER_BUY_QUOTE_VOLUME)?;

        for row in 0..batch.num_rows() {
            candles.push(Candle {
                open_time_ms: open_time.value(row),
                close_time_ms: close_time.value(row),
                open: open.value(row),
                high: high.value(row),
                low: low.value(row),
                close: close.value(row),
                volume: volume.value(row),
                quote_volume: quote_volume.value(row),
                trades: trades.value(row),
                taker_buy_base_volume: taker_base.value(row),
                taker_buy_quote_volume: taker_quote.value(row),
            });
        }
    }

    Ok(candles)
}

/// Encodes a feature frame into a parquet blob. Float64 columns are
/// nullable with NaN mapped to null; Int64 columns are required.
///
/// # Errors
/// - [`StorageError::Arrow`] / [`StorageError::Parquet`] on encoding failure.
pub fn frame_to_parquet(frame: &FeatureFrame) -> Result<Vec<u8>, StorageError> {
    let mut fields = Vec::with_capacity(frame.num_columns());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(frame.num_columns());

    for (name, column) in frame.iter() {
        match column {
            Column::Float64(values) => {
                fields.push(Field::new(name, DataType::Float64, true));
                arrays.push(Arc::new(Float64Array::from_iter(
                    values
                        .iter()
                        .map(|&v| if v.is_nan() { None } else { Some(v) }),
                )));
            }
            Column::Int64(values) => {
                fields.push(Field::new(name, DataType::Int64, false));
                arrays.push(Arc::new(Int64Array::from(values.clone())));
            }
        }
    }

    write_parquet(fields, arrays)
}

/// Decodes a feature frame from a parquet blob written by
/// [`frame_to_parquet`]. Nulls in Float64 columns are restored as NaN.
///
/// # Errors
/// - [`StorageError::InvalidColumnType`] on unsupported column types.
/// - [`StorageError::Parquet`] on decoding failure.
pub fn frame_from_parquet(data: &[u8]) -> Result<FeatureFrame, StorageError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(data.to_vec()))?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let mut floats: Vec<Option<Vec<f64>>> = vec![None; schema.fields().len()];
    let mut ints: Vec<Option<Vec<i64>>> = vec![None; schema.fields().len()];
    let mut rows = 0usize;

    for batch_result in reader {
        let batch = batch_result?;
        rows += batch.num_rows();

        for (idx, field) in schema.fields().iter().enumerate() {
            let array = batch.column(idx);
            match field.data_type() {
                DataType::Float64 => {
                    let values = array
                        .as_any()
                        .downcast_ref::<Float64Array>()
                        .ok_or_else(|| StorageError::InvalidColumnType(field.name().clone()))?;
                    let dst = floats[idx].get_or_insert_with(Vec::new);
                    for row in 0..values.len() {
                        dst.push(if values.is_null(row) {
                            f64::NAN
                        } else {
                            values.value(row)
                        });
                    }
                }
                DataType::Int64 => {
                    let values = array
                        .as_any()
                        .downcast_ref::<Int64Array>()
                        .ok_or_else(|| StorageError::InvalidColumnType(field.name().clone()))?;
                    let dst = ints[idx].get_or_insert_with(Vec::new);
                    dst.extend(values.values().iter().copied());
                }
                other => {
                    return Err(StorageError::InvalidColumnType(format!(
                        "{}: {other}",
                        field.name()
                    )));
                }
            }
        }
    }

    let mut frame = FeatureFrame::new(rows);
    for (idx, field) in schema.fields().iter().enumerate() {
        match field.data_type() {
            DataType::Float64 => {
                frame.push_f64(
                    field.name().clone(),
                    floats[idx].take().unwrap_or_default(),
                )?;
            }
            DataType::Int64 => {
                frame.push_i64(field.name().clone(), ints[idx].take().unwrap_or_default())?;
            }
            _ => unreachable!("rejected above"),
        }
    }

    Ok(frame)
}

fn write_parquet(fields: Vec<Field>, columns: Vec<ArrayRef>) -> Result<Vec<u8>, StorageError> {
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(buffer)
}

fn timestamp_field(name: &str) -> Field {
    Field::new(
        name,
        DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into())),
        false,
    )
}

fn float_array(candles: &[Candle], get: impl Fn(&Candle) -> f64) -> ArrayRef {
    Arc::new(Float64Array::from(
        candles.iter().map(get).collect::<Vec<_>>(),
    ))
}

fn timestamp_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a TimestampMillisecondArray, StorageError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| StorageError::MissingColumn(name.to_string()))?;
    col.as_any()
        .downcast_ref::<TimestampMillisecondArray>()
        .ok_or_else(|| StorageError::InvalidColumnType(name.to_string()))
}

fn float_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array, StorageError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| StorageError::MissingColumn(name.to_string()))?;
    col.as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| StorageError::InvalidColumnType(name.to_string()))
}

fn int_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Int64Array, StorageError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| StorageError::MissingColumn(name.to_string()))?;
    col.as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| StorageError::InvalidColumnType(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candles() -> Vec<Candle> {
        (0..3)
            .map(|i| Candle {
                open_time_ms: 1_709_620_000_000 + i * 3_600_000,
                close_time_ms: 1_709_620_000_000 + (i + 1) * 3_600_000 - 1,
                open: 100.0 + i as f64,
                high: 101.0 + i as f64,
                low: 99.0 + i as f64,
                close: 100.5 + i as f64,
                volume: 10.0 * (i + 1) as f64,
                quote_volume: 1000.0 * (i + 1) as f64,
                trades: 42 + i,
                taker_buy_base_volume: 5.0 * (i + 1) as f64,
                taker_buy_quote_volume: 500.0 * (i + 1) as f64,
            })
            .collect()
    }

    #[test]
    fn test_candle_roundtrip() {
        let candles = sample_candles();
        let bytes = candles_to_parquet(&candles).unwrap();
        let decoded = candles_from_parquet(&bytes).unwrap();
        assert_eq!(decoded, candles);
    }

    #[test]
    fn test_candle_roundtrip_empty() {
        let bytes = candles_to_parquet(&[]).unwrap();
        let decoded = candles_from_parquet(&bytes).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_frame_roundtrip_with_nan() {
        let mut frame = FeatureFrame::new(3);
        frame.push_i64("open_time", vec![1, 2, 3]).unwrap();
        frame
            .push_f64("SMA", vec![f64::NAN, 1.5, 2.5])
            .unwrap();
        frame.push_i64("flag", vec![0, 1, 1]).unwrap();

        let bytes = frame_to_parquet(&frame).unwrap();
        let decoded = frame_from_parquet(&bytes).unwrap();

        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded.names(), frame.names());
        assert_eq!(decoded.i64s("open_time").unwrap(), &[1, 2, 3]);
        assert_eq!(decoded.i64s("flag").unwrap(), &[0, 1, 1]);

        let sma = decoded.f64s("SMA").unwrap();
        assert!(sma[0].is_nan());
        assert!((sma[1] - 1.5).abs() < 1e-10);
        assert!((sma[2] - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_candle_decode_rejects_missing_column() {
        // A feature-frame blob lacks the candle schema.
        let mut frame = FeatureFrame::new(1);
        frame.push_f64("unrelated", vec![1.0]).unwrap();
        let bytes = frame_to_parquet(&frame).unwrap();

        let err = candles_from_parquet(&bytes).unwrap_err();
        assert!(matches!(err, StorageError::MissingColumn(_)));
    }
}
