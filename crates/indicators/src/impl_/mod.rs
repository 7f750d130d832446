//! Indicator implementations.

pub mod bollinger;
pub mod donchian;
pub mod ema;
pub mod rsi;
pub mod shadow;
pub mod sma;
pub mod vwap;
