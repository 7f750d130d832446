//! Candlemill Types
//!
//! Core data structures for the candlemill feature pipeline.
//! This crate provides the candle record, price field selection,
//! and the pipeline configuration.

#![deny(clippy::all)]

pub mod candle;
pub mod config;
pub mod error;
pub mod field;

// Re-export main types for convenience
pub use candle::Candle;
pub use config::{ObjectStoreConfig, PipelineConfig, ShiftConvention};
pub use error::ConfigError;
pub use field::PriceField;
