//! Candle shadow (wick) indicators

use crate::traits::Indicator;
use candlemill_types::Candle;

/// Upper shadow: `high - max(open, close)` per row, no windowing.
#[derive(Debug, Clone)]
pub struct UpperShadow;

impl Indicator for UpperShadow {
    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        candles
            .iter()
            .map(|c| c.high - c.open.max(c.close))
            .collect()
    }

    fn name(&self) -> &str {
        "UpperShadow"
    }

    fn warmup_periods(&self) -> usize {
        0
    }
}

/// Lower shadow: `min(open, close) - low` per row, no windowing.
#[derive(Debug, Clone)]
pub struct LowerShadow;

impl Indicator for LowerShadow {
    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        candles
            .iter()
            .map(|c| c.open.min(c.close) - c.low)
            .collect()
    }

    fn name(&self) -> &str {
        "LowerShadow"
    }

    fn warmup_periods(&self) -> usize {
        0
    }
}
