//! Storage-layer error types.

use candlemill_features::FeatureError;
use thiserror::Error;

/// Errors that can occur while encoding, decoding, or moving partitions.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parquet encoding or decoding failed.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Arrow record batch construction failed.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// A required column is missing from a parquet blob.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column has an unexpected data type.
    #[error("Invalid column type: {0}")]
    InvalidColumnType(String),

    /// A timestamp does not map to a valid UTC instant.
    #[error("Invalid timestamp: {0} ms")]
    InvalidTimestamp(i64),

    /// Feature-frame construction failed during decode or grouping.
    #[error("Frame error: {0}")]
    Frame(#[from] FeatureError),

    /// Backend-specific failure from a remote object store.
    #[error("Object store error: {0}")]
    Backend(String),
}
