//! Candlemill Storage
//!
//! Partitioned columnar persistence for raw candles and feature frames:
//! date/hour partition keys, parquet encoding, an object-store seam with
//! filesystem and in-memory backends, and date-filtered read-back.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Parquet encode/decode for candles and feature frames.
pub mod codec;
/// Storage-layer error types.
pub mod error;
/// Date/hour partition keys and object names.
pub mod key;
/// Partitioned write and date-filtered read operations.
pub mod partition;
/// Object-store trait and backends.
pub mod store;

/// Re-export: decode candles from parquet bytes.
pub use codec::candles_from_parquet;
/// Re-export: encode candles to parquet bytes.
pub use codec::candles_to_parquet;
/// Re-export: decode a feature frame from parquet bytes.
pub use codec::frame_from_parquet;
/// Re-export: encode a feature frame to parquet bytes.
pub use codec::frame_to_parquet;
/// Re-export: storage-layer error type.
pub use error::StorageError;
/// Re-export: date/hour partition key.
pub use key::PartitionKey;
/// Re-export: bucket bootstrap helper.
pub use partition::ensure_bucket;
/// Re-export: date-filtered feature read-back.
pub use partition::read_features_since;
/// Re-export: date-filtered raw candle read-back.
pub use partition::read_raw_since;
/// Re-export: partitioned feature-frame write.
pub use partition::write_feature_partitions;
/// Re-export: partitioned raw candle write.
pub use partition::write_raw_partitions;
/// Re-export: per-batch write outcome counts.
pub use partition::WriteSummary;
/// Re-export: filesystem object store.
pub use store::FsObjectStore;
/// Re-export: in-memory object store.
pub use store::MemoryObjectStore;
/// Re-export: object-store seam.
pub use store::ObjectStore;
