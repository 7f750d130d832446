//! Relative Strength Index (RSI) indicator

use crate::traits::Indicator;
use candlemill_types::{Candle, ShiftConvention};

/// Relative Strength Index
///
/// RS = rolling mean of positive close deltas / rolling mean of
/// non-positive close deltas, RSI = 100 - 100 / (1 + RS).
///
/// Two legacy-parity quirks are preserved deliberately:
/// - Under [`ShiftConvention::Forward`] deltas are `close[i] - close[i+1]`
///   (a forward difference), so the last row is NaN alongside the usual
///   leading warmup rows.
/// - The negative deltas keep their sign, so RS is non-positive and the
///   output is not clamped to [0, 100] the way the textbook oscillator is.
///
/// [`ShiftConvention::Backward`] switches only the delta direction.
#[derive(Debug, Clone)]
pub struct RSI {
    /// Window length for the rolling delta means
    pub period: usize,
    /// Forward (legacy) or backward delta direction
    pub shift: ShiftConvention,
}

impl RSI {
    /// Creates a new RSI indicator with the given period and shift.
    pub fn new(period: usize, shift: ShiftConvention) -> Self {
        Self { period, shift }
    }
}

impl Indicator for RSI {
    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let len = candles.len();
        let mut result = vec![f64::NAN; len];

        if len < self.period || self.period == 0 {
            return result;
        }

        let mut up = vec![f64::NAN; len];
        let mut down = vec![f64::NAN; len];

        for i in 0..len {
            let delta = match self.shift {
                ShiftConvention::Forward => {
                    if i + 1 < len {
                        candles[i].close - candles[i + 1].close
                    } else {
                        f64::NAN
                    }
                }
                ShiftConvention::Backward => {
                    if i > 0 {
                        candles[i].close - candles[i - 1].close
                    } else {
                        f64::NAN
                    }
                }
            };

            if delta.is_nan() {
                continue;
            }
            if delta > 0.0 {
                up[i] = delta;
                down[i] = 0.0;
            } else {
                up[i] = 0.0;
                down[i] = delta;
            }
        }

        let up_mean = rolling_mean(&up, self.period);
        let down_mean = rolling_mean(&down, self.period);

        for i in 0..len {
            if up_mean[i].is_nan() || down_mean[i].is_nan() {
                continue;
            }
            let rs = up_mean[i] / down_mean[i];
            result[i] = 100.0 - 100.0 / (1.0 + rs);
        }

        result
    }

    fn name(&self) -> &str {
        "RSI"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}

/// Trailing-window mean; windows containing NaN stay NaN.
fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    if period == 0 || len < period {
        return result;
    }

    for i in (period - 1)..len {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = window.iter().sum::<f64>() / period as f64;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_::test_util::make_candle;

    #[test]
    fn test_rsi_forward_boundaries() {
        let candles: Vec<Candle> = vec![100.0, 102.0, 101.0, 105.0, 107.0, 104.0]
            .into_iter()
            .map(make_candle)
            .collect();

        let rsi = RSI::new(4, ShiftConvention::Forward);
        let result = rsi.compute(&candles);

        // Leading warmup rows and the forward-shifted tail row are NaN.
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(result[3].is_finite());
        assert!(result[4].is_finite());
        assert!(result[5].is_nan());
    }

    #[test]
    fn test_rsi_forward_matches_manual() {
        let closes = [100.0, 102.0, 101.0, 105.0, 107.0, 104.0];
        let candles: Vec<Candle> = closes.iter().copied().map(make_candle).collect();

        let rsi = RSI::new(4, ShiftConvention::Forward);
        let result = rsi.compute(&candles);

        // deltas[i] = close[i] - close[i+1]:
        // [-2, 1, -4, -2, 3, NaN]
        // up:   [0, 1, 0, 0, 3, NaN]
        // down: [-2, 0, -4, -2, 0, NaN]
        // index 3: mean_up = 1/4, mean_down = -8/4 = -2
        let rs3 = 0.25 / -2.0;
        let expected3 = 100.0 - 100.0 / (1.0 + rs3);
        assert!((result[3] - expected3).abs() < 1e-10);

        // index 4: mean_up = 4/4 = 1, mean_down = -6/4 = -1.5
        let rs4 = 1.0 / -1.5;
        let expected4 = 100.0 - 100.0 / (1.0 + rs4);
        assert!((result[4] - expected4).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_backward_delta_direction() {
        let closes = [100.0, 102.0, 101.0, 105.0, 107.0];
        let candles: Vec<Candle> = closes.iter().copied().map(make_candle).collect();

        let rsi = RSI::new(2, ShiftConvention::Backward);
        let result = rsi.compute(&candles);

        // deltas[i] = close[i] - close[i-1]: [NaN, 2, -1, 4, 2]
        // index 0 and 1 NaN (delta[0] poisons the first full window).
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());

        // index 2: mean_up = (2+0)/2 = 1, mean_down = (0-1)/2 = -0.5
        let rs2 = 1.0 / -0.5;
        let expected2 = 100.0 - 100.0 / (1.0 + rs2);
        assert!((result[2] - expected2).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_series_is_nan() {
        // All deltas zero: mean_up = mean_down = 0, RS = 0/0 = NaN
        let candles: Vec<Candle> = vec![50.0; 8].into_iter().map(make_candle).collect();

        let rsi = RSI::new(3, ShiftConvention::Forward);
        let result = rsi.compute(&candles);

        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let candles: Vec<Candle> = vec![1.0, 2.0].into_iter().map(make_candle).collect();

        let rsi = RSI::new(5, ShiftConvention::Forward);
        let result = rsi.compute(&candles);

        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_rolling_mean_nan_poisoning() {
        let values = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let result = rolling_mean(&values, 2);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!((result[3] - 3.5).abs() < 1e-10);
        assert!((result[4] - 4.5).abs() < 1e-10);
    }
}
