//! Bollinger Bands indicator

use crate::traits::{IntoMultiVecs, MultiOutputIndicator};
use candlemill_types::Candle;

/// Bollinger Bands result containing basis, upper, and lower bands.
#[derive(Debug, Clone)]
pub struct BollingerResult {
    /// Basis band = rolling mean of close
    pub basis: Vec<f64>,
    /// Upper band = basis + std_factor * std
    pub upper: Vec<f64>,
    /// Lower band = basis - std_factor * std
    pub lower: Vec<f64>,
}

impl IntoMultiVecs for BollingerResult {
    fn into_vecs(self) -> Vec<Vec<f64>> {
        vec![self.basis, self.upper, self.lower]
    }
}

/// Bollinger Bands
///
/// Calculates three bands around a simple moving average of close:
/// - Basis = SMA(close)
/// - Upper = Basis + (std_factor * StdDev)
/// - Lower = Basis - (std_factor * StdDev)
///
/// Uses sample standard deviation (n-1) for pandas `rolling().std()`
/// parity. A window of one observation therefore stays NaN.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    /// Period for the SMA and standard deviation
    pub period: usize,
    /// Multiplier for standard deviation (typically 2.0)
    pub std_factor: f64,
}

impl BollingerBands {
    /// Creates new Bollinger Bands with the given parameters.
    pub fn new(period: usize, std_factor: f64) -> Self {
        Self { period, std_factor }
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Output = BollingerResult;

    fn compute_all(&self, candles: &[Candle]) -> Self::Output {
        let len = candles.len();
        let mut basis = vec![f64::NAN; len];
        let mut upper = vec![f64::NAN; len];
        let mut lower = vec![f64::NAN; len];

        if len < self.period || self.period < 2 {
            return BollingerResult {
                basis,
                upper,
                lower,
            };
        }

        for i in (self.period - 1)..len {
            let start = i + 1 - self.period;
            let window: Vec<f64> = candles[start..=i].iter().map(|c| c.close).collect();

            let sma = window.iter().sum::<f64>() / self.period as f64;

            // Sample variance (n-1) for pandas parity
            let variance = window.iter().map(|x| (x - sma).powi(2)).sum::<f64>()
                / (self.period - 1) as f64;
            let std = variance.sqrt();

            basis[i] = sma;
            upper[i] = sma + self.std_factor * std;
            lower[i] = sma - self.std_factor * std;
        }

        BollingerResult {
            basis,
            upper,
            lower,
        }
    }

    fn name(&self) -> &str {
        "BOLLINGER"
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }

    fn output_names(&self) -> &'static [&'static str] {
        &["basis", "upper", "lower"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_::test_util::make_candle;

    #[test]
    fn test_bollinger_basic() {
        let candles: Vec<Candle> = vec![1.0, 2.0, 3.0, 4.0, 5.0]
            .into_iter()
            .map(make_candle)
            .collect();

        let bb = BollingerBands::new(3, 2.0);
        let result = bb.compute_all(&candles);

        assert!(result.basis[0].is_nan());
        assert!(result.basis[1].is_nan());

        // At index 2: window = [1, 2, 3]
        // SMA = 2.0
        // Sample variance = ((1-2)^2 + (2-2)^2 + (3-2)^2) / 2 = 1.0
        let expected_sma = 2.0;
        let expected_std = 1.0;

        assert!((result.basis[2] - expected_sma).abs() < 1e-10);
        assert!((result.upper[2] - (expected_sma + 2.0 * expected_std)).abs() < 1e-10);
        assert!((result.lower[2] - (expected_sma - 2.0 * expected_std)).abs() < 1e-10);
    }

    #[test]
    fn test_bollinger_band_width_is_twice_std() {
        let closes = [4.1, 6.3, 5.2, 7.9, 6.6, 8.4, 7.1, 9.0];
        let candles: Vec<Candle> = closes.iter().copied().map(make_candle).collect();

        let period = 4;
        let bb = BollingerBands::new(period, 2.0);
        let result = bb.compute_all(&candles);

        for i in (period - 1)..closes.len() {
            let window = &closes[i + 1 - period..=i];
            let mean = window.iter().sum::<f64>() / period as f64;
            let std = (window.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
                / (period - 1) as f64)
                .sqrt();

            assert!((result.upper[i] - result.basis[i] - 2.0 * std).abs() < 1e-10);
            assert!((result.basis[i] - result.lower[i] - 2.0 * std).abs() < 1e-10);
        }
    }

    #[test]
    fn test_bollinger_constant_input() {
        // When all values are the same, std should be 0
        let candles: Vec<Candle> = vec![100.0; 10].into_iter().map(make_candle).collect();

        let bb = BollingerBands::new(5, 2.0);
        let result = bb.compute_all(&candles);

        for i in 4..10 {
            assert!((result.basis[i] - 100.0).abs() < 1e-10);
            assert!((result.upper[i] - 100.0).abs() < 1e-10); // std = 0
            assert!((result.lower[i] - 100.0).abs() < 1e-10); // std = 0
        }
    }

    #[test]
    fn test_bollinger_symmetry() {
        let candles: Vec<Candle> = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0, 2.0]
            .into_iter()
            .map(make_candle)
            .collect();

        let bb = BollingerBands::new(3, 2.0);
        let result = bb.compute_all(&candles);

        // Check that upper and lower are symmetric around the basis
        for i in 2..candles.len() {
            let basis = result.basis[i];
            let upper_dist = result.upper[i] - basis;
            let lower_dist = basis - result.lower[i];
            assert!(
                (upper_dist - lower_dist).abs() < 1e-10,
                "Bands not symmetric at index {}",
                i
            );
        }
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let candles: Vec<Candle> = vec![1.0, 2.0].into_iter().map(make_candle).collect();

        let bb = BollingerBands::new(5, 2.0);
        let result = bb.compute_all(&candles);

        assert!(result.basis.iter().all(|v| v.is_nan()));
        assert!(result.upper.iter().all(|v| v.is_nan()));
        assert!(result.lower.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_bollinger_period_one_returns_nan() {
        // Sample std of a single observation is undefined
        let candles: Vec<Candle> = vec![1.0, 2.0, 3.0].into_iter().map(make_candle).collect();

        let bb = BollingerBands::new(1, 2.0);
        let result = bb.compute_all(&candles);

        assert!(result.basis.iter().all(|v| v.is_nan()));
    }
}
