//! Feature assembly.
//!
//! Runs the full indicator set plus past/future trend scores over an
//! ordered candle sequence and produces a [`FeatureFrame`] with a
//! next-close `target` column. Pure transform: the input is never
//! mutated and the output is rebuilt column by column.

use candlemill_indicators::{
    BollingerBands, Donchian, EMA, Indicator, LowerShadow, MultiOutputIndicator, RSI, SMA,
    UpperShadow, VWAP, trend_score,
};
use candlemill_types::{Candle, PriceField, ShiftConvention};

use crate::columns;
use crate::error::FeatureError;
use crate::frame::FeatureFrame;
use crate::validate::validate_candles;

/// Parameters for feature assembly.
///
/// Each field was a hard-coded constant in the original pipeline; the
/// defaults reproduce it exactly (window 4, forward shift, 2-sigma
/// Bollinger bands).
#[derive(Debug, Clone)]
pub struct FeatureParams {
    /// Rolling window size shared by all windowed indicators. Trend
    /// scores are computed for every window size in `1..window`.
    pub window: usize,
    /// Shift convention for EMA and RSI.
    pub shift: ShiftConvention,
    /// Standard-deviation multiplier for the Bollinger bands.
    pub bollinger_std_factor: f64,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            window: 4,
            shift: ShiftConvention::Forward,
            bollinger_std_factor: 2.0,
        }
    }
}

/// Assembles the feature table for an ordered candle sequence.
///
/// Rows whose window reaches past either end of the sequence carry NaN
/// in the affected columns; that is expected output, not an error.
///
/// # Errors
/// - [`FeatureError::InvalidWindow`] when `params.window < 2`.
/// - [`FeatureError::EmptyInput`] / [`FeatureError::CorruptData`] from
///   input validation.
/// - [`FeatureError::InsufficientRows`] when fewer rows than the window.
pub fn assemble_features(
    candles: &[Candle],
    params: &FeatureParams,
) -> Result<FeatureFrame, FeatureError> {
    if params.window < 2 {
        return Err(FeatureError::InvalidWindow(params.window));
    }

    validate_candles(candles)?;

    if candles.len() < params.window {
        return Err(FeatureError::InsufficientRows {
            required: params.window,
            available: candles.len(),
        });
    }

    let len = candles.len();
    let window = params.window;
    let mut frame = FeatureFrame::new(len);

    push_base_columns(&mut frame, candles)?;

    frame.push_f64(
        columns::EMA,
        EMA::new(PriceField::Close, window, params.shift).compute(candles),
    )?;
    frame.push_f64(
        columns::SMA,
        SMA::new(PriceField::Close, window).compute(candles),
    )?;
    frame.push_f64(columns::VWAP, VWAP::new(window).compute(candles))?;
    frame.push_f64(columns::RSI, RSI::new(window, params.shift).compute(candles))?;

    let donchian = Donchian::new(PriceField::Close, window).compute_all(candles);
    frame.push_f64(columns::DC_DOWN, donchian.down)?;
    frame.push_f64(columns::DC_UP, donchian.up)?;
    frame.push_f64(columns::DC_MID, donchian.mid)?;

    let bollinger =
        BollingerBands::new(window, params.bollinger_std_factor).compute_all(candles);
    frame.push_f64(columns::BOLLINGER_BASIS, bollinger.basis)?;
    frame.push_f64(columns::BOLLINGER_UPPER, bollinger.upper)?;
    frame.push_f64(columns::BOLLINGER_LOWER, bollinger.lower)?;

    frame.push_f64(columns::UPPER_SHADOW, UpperShadow.compute(candles))?;
    frame.push_f64(columns::LOWER_SHADOW, LowerShadow.compute(candles))?;

    // target[i] = close[i+1]; the last row has no next close.
    let mut target = vec![f64::NAN; len];
    for i in 0..len - 1 {
        target[i] = candles[i + 1].close;
    }
    frame.push_f64(columns::TARGET, target)?;

    let opens: Vec<f64> = candles.iter().map(|c| c.open).collect();

    for w in 1..window {
        let future = future_trend_scores(&opens, w);
        let future_name = columns::future_trend(w);
        let future_flags = trend_flags(&future);
        frame.push_f64(future_name.clone(), future)?;
        frame.push_i64(columns::flag(&future_name), future_flags)?;

        let past = past_trend_scores(&opens, w);
        let past_name = columns::past_trend(w);
        let past_flags = trend_flags(&past);
        frame.push_f64(past_name.clone(), past)?;
        frame.push_i64(columns::flag(&past_name), past_flags)?;
    }

    Ok(frame)
}

/// Trailing trend score: window of size `w` ending at each row.
fn past_trend_scores(values: &[f64], w: usize) -> Vec<f64> {
    let len = values.len();
    let mut out = vec![f64::NAN; len];
    for i in 0..len {
        if i + 1 >= w {
            out[i] = trend_score(&values[i + 1 - w..=i]);
        }
    }
    out
}

/// Forward trend score: window of size `w` starting at each row.
/// Truncated tail windows stay NaN.
fn future_trend_scores(values: &[f64], w: usize) -> Vec<f64> {
    let len = values.len();
    let mut out = vec![f64::NAN; len];
    for i in 0..len {
        if i + w <= len {
            out[i] = trend_score(&values[i..i + w]);
        }
    }
    out
}

/// Binary flag: 1 when the score is >= 0, else 0. NaN maps to 0,
/// matching the pandas `NaN >= 0 == False` behaviour.
fn trend_flags(scores: &[f64]) -> Vec<i64> {
    scores.iter().map(|&s| i64::from(s >= 0.0)).collect()
}

fn push_base_columns(frame: &mut FeatureFrame, candles: &[Candle]) -> Result<(), FeatureError> {
    frame.push_i64(
        columns::OPEN_TIME,
        candles.iter().map(|c| c.open_time_ms).collect(),
    )?;
    frame.push_i64(
        columns::CLOSE_TIME,
        candles.iter().map(|c| c.close_time_ms).collect(),
    )?;
    frame.push_f64(columns::OPEN, candles.iter().map(|c| c.open).collect())?;
    frame.push_f64(columns::HIGH, candles.iter().map(|c| c.high).collect())?;
    frame.push_f64(columns::LOW, candles.iter().map(|c| c.low).collect())?;
    frame.push_f64(columns::CLOSE, candles.iter().map(|c| c.close).collect())?;
    frame.push_f64(columns::VOLUME, candles.iter().map(|c| c.volume).collect())?;
    frame.push_f64(
        columns::QUOTE_VOLUME,
        candles.iter().map(|c| c.quote_volume).collect(),
    )?;
    frame.push_i64(columns::TRADES, candles.iter().map(|c| c.trades).collect())?;
    frame.push_f64(
        columns::TAKER_BUY_BASE_VOLUME,
        candles.iter().map(|c| c.taker_buy_base_volume).collect(),
    )?;
    frame.push_f64(
        columns::TAKER_BUY_QUOTE_VOLUME,
        candles.iter().map(|c| c.taker_buy_quote_volume).collect(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly_candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                open_time_ms: i as i64 * 3_600_000,
                close_time_ms: (i as i64 + 1) * 3_600_000 - 1,
                open: close,
                high: close,
                low: close,
                close,
                volume: 10.0,
                quote_volume: close * 10.0,
                trades: 5,
                taker_buy_base_volume: 5.0,
                taker_buy_quote_volume: close * 5.0,
            })
            .collect()
    }

    #[test]
    fn test_assemble_sma_worked_example() {
        let candles = hourly_candles(&[100.0, 102.0, 101.0, 105.0, 107.0]);
        let frame = assemble_features(&candles, &FeatureParams::default()).unwrap();

        let sma = frame.f64s(columns::SMA).unwrap();
        assert!(sma[0].is_nan());
        assert!(sma[1].is_nan());
        assert!(sma[2].is_nan());
        assert!((sma[3] - 102.0).abs() < 1e-10);
        assert!((sma[4] - 103.75).abs() < 1e-10);
    }

    #[test]
    fn test_assemble_target_is_next_close() {
        let candles = hourly_candles(&[100.0, 102.0, 101.0, 105.0, 107.0]);
        let frame = assemble_features(&candles, &FeatureParams::default()).unwrap();

        let target = frame.f64s(columns::TARGET).unwrap();
        let close = frame.f64s(columns::CLOSE).unwrap();
        for i in 0..candles.len() - 1 {
            assert!((target[i] - close[i + 1]).abs() < 1e-10, "row {i}");
        }
        assert!(target[candles.len() - 1].is_nan());
    }

    #[test]
    fn test_assemble_trend_columns_present_for_all_windows() {
        let candles = hourly_candles(&[100.0, 102.0, 101.0, 105.0, 107.0, 104.0]);
        let frame = assemble_features(&candles, &FeatureParams::default()).unwrap();

        for w in 1..4 {
            let past = columns::past_trend(w);
            let future = columns::future_trend(w);
            assert!(frame.f64s(&past).is_ok(), "missing {past}");
            assert!(frame.f64s(&future).is_ok(), "missing {future}");
            assert!(frame.i64s(&columns::flag(&past)).is_ok());
            assert!(frame.i64s(&columns::flag(&future)).is_ok());
        }
    }

    #[test]
    fn test_assemble_future_trend_boundaries() {
        // Rising opens: every defined future score must be positive.
        let candles = hourly_candles(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        let frame = assemble_features(&candles, &FeatureParams::default()).unwrap();

        let future3 = frame.f64s(&columns::future_trend(3)).unwrap();
        // windows [i..i+3] exist for i <= 2
        for value in future3.iter().take(3) {
            assert!(*value > 0.0);
        }
        assert!(future3[3].is_nan());
        assert!(future3[4].is_nan());

        let flags = frame.i64s(&columns::flag(&columns::future_trend(3))).unwrap();
        assert_eq!(flags, &[1, 1, 1, 0, 0]); // NaN rows flag as 0
    }

    #[test]
    fn test_assemble_past_trend_boundaries() {
        let candles = hourly_candles(&[104.0, 103.0, 102.0, 101.0, 100.0]);
        let frame = assemble_features(&candles, &FeatureParams::default()).unwrap();

        let past2 = frame.f64s(&columns::past_trend(2)).unwrap();
        assert!(past2[0].is_nan());
        for value in past2.iter().skip(1) {
            assert!(*value < 0.0); // falling opens
        }

        // Window size 1 always fits and scores 0.
        let past1 = frame.f64s(&columns::past_trend(1)).unwrap();
        for value in past1 {
            assert!(value.abs() < 1e-10);
        }
    }

    #[test]
    fn test_assemble_bollinger_band_distance() {
        let candles = hourly_candles(&[100.0, 102.0, 101.0, 105.0, 107.0, 103.0]);
        let frame = assemble_features(&candles, &FeatureParams::default()).unwrap();

        let basis = frame.f64s(columns::BOLLINGER_BASIS).unwrap();
        let upper = frame.f64s(columns::BOLLINGER_UPPER).unwrap();
        let lower = frame.f64s(columns::BOLLINGER_LOWER).unwrap();

        for i in 3..candles.len() {
            let up_dist = upper[i] - basis[i];
            let down_dist = basis[i] - lower[i];
            assert!((up_dist - down_dist).abs() < 1e-10, "row {i}");
            assert!(up_dist > 0.0);
        }
    }

    #[test]
    fn test_assemble_rejects_empty() {
        let err = assemble_features(&[], &FeatureParams::default()).unwrap_err();
        assert!(matches!(err, FeatureError::EmptyInput));
    }

    #[test]
    fn test_assemble_rejects_insufficient_rows() {
        let candles = hourly_candles(&[100.0, 101.0]);
        let err = assemble_features(&candles, &FeatureParams::default()).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::InsufficientRows {
                required: 4,
                available: 2
            }
        ));
    }

    #[test]
    fn test_assemble_rejects_non_monotonic() {
        let mut candles = hourly_candles(&[100.0, 101.0, 102.0, 103.0]);
        candles[2].open_time_ms = candles[1].open_time_ms - 1;
        candles[2].close_time_ms = candles[2].open_time_ms + 1;
        let err = assemble_features(&candles, &FeatureParams::default()).unwrap_err();
        assert!(matches!(err, FeatureError::CorruptData(_)));
    }

    #[test]
    fn test_assemble_rejects_window_below_two() {
        let candles = hourly_candles(&[100.0, 101.0, 102.0]);
        let params = FeatureParams {
            window: 1,
            ..FeatureParams::default()
        };
        let err = assemble_features(&candles, &params).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidWindow(1)));
    }

    #[test]
    fn test_assemble_row_count_and_base_columns() {
        let candles = hourly_candles(&[100.0, 102.0, 101.0, 105.0, 107.0]);
        let frame = assemble_features(&candles, &FeatureParams::default()).unwrap();

        assert_eq!(frame.len(), candles.len());
        let open_time = frame.i64s(columns::OPEN_TIME).unwrap();
        for (i, candle) in candles.iter().enumerate() {
            assert_eq!(open_time[i], candle.open_time_ms);
        }
        let trades = frame.i64s(columns::TRADES).unwrap();
        assert!(trades.iter().all(|&t| t == 5));
    }
}
