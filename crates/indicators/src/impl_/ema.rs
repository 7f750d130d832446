//! Exponential Moving Average (EMA) indicator

use crate::traits::Indicator;
use candlemill_types::{Candle, PriceField, ShiftConvention};

/// Exponential Moving Average
///
/// Smoothing factor K = 2 / (period + 1).
///
/// Under [`ShiftConvention::Forward`] the value is
/// `v[i] * K + v[i+1] * (1 - K)` — a forward shift against the *next*
/// observation, reproducing the legacy pipeline exactly. This diverges
/// from the textbook recursive EMA on purpose; the trained model depends
/// on it. [`ShiftConvention::Backward`] selects the conventional
/// recursion (pandas `ewm(span=period, adjust=False).mean()`).
#[derive(Debug, Clone)]
pub struct EMA {
    /// Price field the average is taken over
    pub field: PriceField,
    /// Number of periods for the EMA
    pub period: usize,
    /// Forward (legacy) or backward (textbook) convention
    pub shift: ShiftConvention,
}

impl EMA {
    /// Creates a new EMA indicator with the given field, period and shift.
    pub fn new(field: PriceField, period: usize, shift: ShiftConvention) -> Self {
        Self {
            field,
            period,
            shift,
        }
    }

    /// Calculates the EMA multiplier (smoothing factor).
    fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for EMA {
    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let len = candles.len();
        let mut result = vec![f64::NAN; len];

        if self.period == 0 || len == 0 {
            return result;
        }

        let k = self.multiplier();

        match self.shift {
            ShiftConvention::Forward => {
                // The last row has no next observation and stays NaN.
                for i in 0..len.saturating_sub(1) {
                    let value = self.field.value(&candles[i]);
                    let next = self.field.value(&candles[i + 1]);
                    result[i] = value * k + next * (1.0 - k);
                }
            }
            ShiftConvention::Backward => {
                let mut prev = f64::NAN;
                for (i, candle) in candles.iter().enumerate() {
                    let value = self.field.value(candle);
                    if !value.is_finite() {
                        if prev.is_finite() {
                            result[i] = prev;
                        }
                        continue;
                    }

                    if !prev.is_finite() {
                        prev = value;
                    } else {
                        prev = k * value + (1.0 - k) * prev;
                    }
                    result[i] = prev;
                }
            }
        }

        result
    }

    fn name(&self) -> &str {
        "EMA"
    }

    fn warmup_periods(&self) -> usize {
        1
    }
}
