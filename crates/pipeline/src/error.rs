//! Pipeline-layer error types.

use thiserror::Error;

use candlemill_features::FeatureError;
use candlemill_ingest::IngestError;
use candlemill_storage::StorageError;
use candlemill_types::ConfigError;

/// Errors that can occur while running pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration loading or validation failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Fetching candles from the exchange failed.
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Reading or writing partitions failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Feature assembly failed.
    #[error("Feature error: {0}")]
    Feature(#[from] FeatureError),

    /// The transform stage found no raw candles to work on.
    #[error("No raw candles found from {start_ms} ms onward")]
    NoRawData {
        /// Requested start of the read window, epoch milliseconds.
        start_ms: i64,
    },
}
