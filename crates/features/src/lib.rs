//! Candlemill Features
//!
//! Feature assembly for the candlemill pipeline: validates an ordered
//! candle sequence, runs the indicator set and trend-score estimator
//! over it, and produces a columnar [`FeatureFrame`] with a
//! next-close regression target.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assemble;
pub mod columns;
pub mod error;
pub mod frame;
pub mod validate;

/// Re-export: feature assembly entry point.
pub use assemble::assemble_features;
/// Re-export: feature assembly parameters.
pub use assemble::FeatureParams;
/// Re-export: feature-layer error type.
pub use error::FeatureError;
/// Re-export: typed column storage.
pub use frame::Column;
/// Re-export: columnar feature table.
pub use frame::FeatureFrame;
/// Re-export: candle sequence validation.
pub use validate::validate_candles;
