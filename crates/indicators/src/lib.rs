//! Candlemill Indicators
//!
//! Technical indicator engine for the candlemill feature pipeline.
//! Provides the full indicator set consumed by feature assembly.
//!
//! # Features
//! - Indicator trait with vectorized computation
//! - Multi-output indicators (Donchian channel, Bollinger Bands)
//! - OLS trend-score estimator for past/future trend features
//!
//! # Available Indicators
//! - SMA: Simple Moving Average
//! - EMA: Exponential Moving Average (forward-shift or recursive)
//! - RSI: Relative Strength Index (signed legacy variant)
//! - VWAP: Volume-Weighted Average Price
//! - Donchian: rolling max/mid/min channel
//! - Bollinger Bands: basis, upper, lower bands
//! - Upper/Lower Shadow: per-candle wick lengths

pub mod impl_;
pub mod traits;
pub mod trend;

// Re-export main types
pub use traits::{Indicator, IntoMultiVecs, MultiOutputIndicator};
pub use trend::{ols_coefficients, trend_score};

// Re-export indicator implementations
pub use impl_::{
    bollinger::{BollingerBands, BollingerResult},
    donchian::{Donchian, DonchianResult},
    ema::EMA,
    rsi::RSI,
    shadow::{LowerShadow, UpperShadow},
    sma::SMA,
    vwap::VWAP,
};
