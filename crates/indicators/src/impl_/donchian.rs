//! Donchian channel indicator

use crate::traits::{IntoMultiVecs, MultiOutputIndicator};
use candlemill_types::{Candle, PriceField};

/// Donchian channel result containing upper, mid, and lower series.
#[derive(Debug, Clone)]
pub struct DonchianResult {
    /// Rolling maximum over the window
    pub up: Vec<f64>,
    /// Average of rolling maximum and minimum
    pub mid: Vec<f64>,
    /// Rolling minimum over the window
    pub down: Vec<f64>,
}

impl IntoMultiVecs for DonchianResult {
    fn into_vecs(self) -> Vec<Vec<f64>> {
        vec![self.up, self.mid, self.down]
    }
}

/// Donchian Channel
///
/// Rolling max (up), rolling min (down), and their average (mid) of the
/// selected price field over the trailing window.
#[derive(Debug, Clone)]
pub struct Donchian {
    /// Price field the channel is computed over
    pub field: PriceField,
    /// Window length
    pub period: usize,
}

impl Donchian {
    /// Creates a new Donchian channel with the given field and period.
    pub fn new(field: PriceField, period: usize) -> Self {
        Self { field, period }
    }
}

impl MultiOutputIndicator for Donchian {
    type Output = DonchianResult;

    fn compute_all(&self, candles: &[Candle]) -> Self::Output {
        let len = candles.len();
        let mut up = vec![f64::NAN; len];
        let mut mid = vec![f64::NAN; len];
        let mut down = vec![f64::NAN; len];

        if len < self.period || self.period == 0 {
            return DonchianResult { up, mid, down };
        }

        for i in (self.period - 1)..len {
            let start = i + 1 - self.period;
            let mut max = f64::NEG_INFINITY;
            let mut min = f64::INFINITY;
            for candle in &candles[start..=i] {
                let value = self.field.value(candle);
                max = max.max(value);
                min = min.min(value);
            }
            up[i] = max;
            down[i] = min;
            mid[i] = (max + min) / 2.0;
        }

        DonchianResult { up, mid, down }
    }

    fn name(&self) -> &str {
        "DONCHIAN"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }

    fn output_names(&self) -> &'static [&'static str] {
        &["up", "mid", "down"]
    }
}
