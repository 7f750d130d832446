//! Candle sequence validation.
//!
//! Every rolling-window computation assumes a strictly time-ordered
//! sequence, so malformed input is rejected before any indicator runs.

use crate::error::FeatureError;
use candlemill_types::Candle;

/// Validates an ordered candle sequence.
///
/// # Errors
/// - [`FeatureError::EmptyInput`] when `candles` is empty.
/// - [`FeatureError::CorruptData`] on non-finite fields, negative volume,
///   OHLC range violations, or non-monotonic timestamps.
pub fn validate_candles(candles: &[Candle]) -> Result<(), FeatureError> {
    if candles.is_empty() {
        return Err(FeatureError::EmptyInput);
    }

    for (i, candle) in candles.iter().enumerate() {
        if !candle.open.is_finite()
            || !candle.high.is_finite()
            || !candle.low.is_finite()
            || !candle.close.is_finite()
            || !candle.volume.is_finite()
        {
            return Err(FeatureError::CorruptData(format!(
                "NaN/Inf at index {i}: {candle:?}"
            )));
        }

        if candle.volume < 0.0 {
            return Err(FeatureError::CorruptData(format!(
                "Negative volume at index {i}: {}",
                candle.volume
            )));
        }

        if candle.low > candle.open
            || candle.low > candle.close
            || candle.high < candle.open
            || candle.high < candle.close
            || candle.low > candle.high
        {
            return Err(FeatureError::CorruptData(format!(
                "Invalid OHLC at index {i}: low={}, high={}, open={}, close={}",
                candle.low, candle.high, candle.open, candle.close
            )));
        }

        if candle.close_time_ms < candle.open_time_ms {
            return Err(FeatureError::CorruptData(format!(
                "Close time before open at index {i}: close_time_ms={} < open_time_ms={}",
                candle.close_time_ms, candle.open_time_ms
            )));
        }

        if i > 0 && candle.open_time_ms <= candles[i - 1].open_time_ms {
            return Err(FeatureError::CorruptData(format!(
                "Non-monotonic timestamp at index {i}: {} <= {}",
                candle.open_time_ms,
                candles[i - 1].open_time_ms
            )));
        }
    }

    Ok(())
}
