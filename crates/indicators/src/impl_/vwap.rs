//! Volume-Weighted Average Price (VWAP) indicator

use crate::traits::Indicator;
use candlemill_types::Candle;

/// Volume-Weighted Average Price
///
/// Rolling sum of typical price (high + low + close) / 3 divided by the
/// rolling sum of volume over the same window. The numerator sums the
/// typical price itself, not price * volume — legacy pipeline parity.
#[derive(Debug, Clone)]
pub struct VWAP {
    /// Window length
    pub period: usize,
}

impl VWAP {
    /// Creates a new VWAP indicator with the given period.
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Indicator for VWAP {
    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let len = candles.len();
        let mut result = vec![f64::NAN; len];

        if len < self.period || self.period == 0 {
            return result;
        }

        let mut tp_sum: f64 = candles[..self.period].iter().map(Candle::typical_price).sum();
        let mut vol_sum: f64 = candles[..self.period].iter().map(|c| c.volume).sum();
        result[self.period - 1] = tp_sum / vol_sum;

        for i in self.period..len {
            tp_sum += candles[i].typical_price() - candles[i - self.period].typical_price();
            vol_sum += candles[i].volume - candles[i - self.period].volume;
            result[i] = tp_sum / vol_sum;
        }

        result
    }

    fn name(&self) -> &str {
        "VWAP"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_::test_util::make_ohlcv;

    #[test]
    fn test_vwap_basic() {
        let candles = vec![
            make_ohlcv(10.0, 12.0, 8.0, 10.0, 2.0), // tp = 10
            make_ohlcv(11.0, 14.0, 10.0, 12.0, 4.0), // tp = 12
            make_ohlcv(12.0, 16.0, 11.0, 15.0, 6.0), // tp = 14
        ];

        let vwap = VWAP::new(2);
        let result = vwap.compute(&candles);

        assert!(result[0].is_nan());
        // (10 + 12) / (2 + 4)
        assert!((result[1] - 22.0 / 6.0).abs() < 1e-10);
        // (12 + 14) / (4 + 6)
        assert!((result[2] - 26.0 / 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_vwap_matches_naive_recomputation() {
        let candles: Vec<_> = (0..10)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                make_ohlcv(base, base + 2.0, base - 2.0, base + 1.0, 10.0 + i as f64)
            })
            .collect();

        let period = 4;
        let vwap = VWAP::new(period);
        let result = vwap.compute(&candles);

        for i in (period - 1)..candles.len() {
            let window = &candles[i + 1 - period..=i];
            let tp: f64 = window.iter().map(|c| c.typical_price()).sum();
            let vol: f64 = window.iter().map(|c| c.volume).sum();
            assert!((result[i] - tp / vol).abs() < 1e-10, "mismatch at index {i}");
        }
    }

    #[test]
    fn test_vwap_insufficient_data() {
        let candles = vec![make_ohlcv(1.0, 2.0, 0.5, 1.5, 1.0)];

        let vwap = VWAP::new(3);
        let result = vwap.compute(&candles);

        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_vwap_period_zero_returns_nan() {
        let candles = vec![make_ohlcv(1.0, 2.0, 0.5, 1.5, 1.0); 3];

        let vwap = VWAP::new(0);
        let result = vwap.compute(&candles);

        assert!(result.iter().all(|v| v.is_nan()));
    }
}
