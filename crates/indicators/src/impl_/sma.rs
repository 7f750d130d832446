//! Simple Moving Average (SMA) indicator

use crate::traits::Indicator;
use candlemill_types::{Candle, PriceField};

/// Simple Moving Average
///
/// Calculates the arithmetic mean of the last N values of the selected
/// price field, inclusive of the current bar.
#[derive(Debug, Clone)]
pub struct SMA {
    /// Price field the average is taken over
    pub field: PriceField,
    /// Number of periods for the moving average
    pub period: usize,
}

impl SMA {
    /// Creates a new SMA indicator with the given field and period.
    pub fn new(field: PriceField, period: usize) -> Self {
        Self { field, period }
    }
}

impl Indicator for SMA {
    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let len = candles.len();
        let mut result = vec![f64::NAN; len];

        if len < self.period || self.period == 0 {
            return result;
        }

        // Calculate initial sum
        let mut sum: f64 = candles[..self.period]
            .iter()
            .map(|c| self.field.value(c))
            .sum();
        result[self.period - 1] = sum / self.period as f64;

        // Rolling calculation
        for i in self.period..len {
            sum += self.field.value(&candles[i]) - self.field.value(&candles[i - self.period]);
            result[i] = sum / self.period as f64;
        }

        result
    }

    fn name(&self) -> &str {
        "SMA"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}
