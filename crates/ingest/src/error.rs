//! Ingest-layer error types.

use thiserror::Error;

/// Errors that can occur while fetching candles from the exchange.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The response body did not match the expected kline layout.
    #[error("Malformed response: {0}")]
    Malformed(String),
}
