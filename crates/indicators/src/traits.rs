//! Indicator traits.
//!
//! Defines the computation contract shared by all indicators.

use candlemill_types::Candle;

/// Trait for single-output indicators.
///
/// All indicators compute over the full candle series and return a
/// `Vec<f64>` of the same length. Entries where the window cannot be
/// fully evaluated (leading warmup, or trailing rows for forward-shifted
/// indicators) are NaN — this is expected output, not an error.
pub trait Indicator: Send + Sync {
    /// Computes the indicator for all candles.
    ///
    /// Returns `Vec<f64>` with the same length as `candles`.
    fn compute(&self, candles: &[Candle]) -> Vec<f64>;

    /// Name of the indicator (e.g., "EMA", "VWAP").
    fn name(&self) -> &str;

    /// Minimum number of bars required for valid output.
    fn warmup_periods(&self) -> usize;
}

/// Trait for multi-output indicators like Bollinger Bands.
///
/// These indicators produce multiple series (e.g., upper, basis, lower
/// bands) that are computed together for efficiency.
pub trait MultiOutputIndicator: Send + Sync {
    /// Type of the output structure
    type Output: IntoMultiVecs;

    /// Computes all outputs at once.
    fn compute_all(&self, candles: &[Candle]) -> Self::Output;

    /// Name of the indicator.
    fn name(&self) -> &str;

    /// Minimum number of bars for valid output.
    fn warmup_periods(&self) -> usize;

    /// List of output names, in `into_vecs` order.
    fn output_names(&self) -> &'static [&'static str];
}

/// Trait for converting multi-output results into a vector of vectors.
pub trait IntoMultiVecs {
    /// Converts the output structure into a vector of value vectors.
    fn into_vecs(self) -> Vec<Vec<f64>>;
}
