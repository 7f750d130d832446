//! Candlemill Ingest
//!
//! Blocking HTTP client for fetching historical klines from the
//! Binance spot REST API, with pagination and bounded retries.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;

/// Re-export: Binance klines client.
pub use client::BinanceClient;
/// Re-export: ingest-layer error type.
pub use error::IngestError;
