//! Feature-layer error types.

use thiserror::Error;

/// Errors raised during validation, frame construction, or assembly.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Input candle sequence is empty.
    #[error("Empty input")]
    EmptyInput,

    /// Input violated an ordering or numeric invariant.
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// Not enough rows to evaluate the largest window.
    #[error("Insufficient rows: need {required}, have {available}")]
    InsufficientRows {
        /// Required number of rows.
        required: usize,
        /// Available number of rows.
        available: usize,
    },

    /// Window parameter out of range.
    #[error("Invalid window: {0} (must be at least 2)")]
    InvalidWindow(usize),

    /// A column with this name already exists in the frame.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A column's length does not match the frame length.
    #[error("Length mismatch for column {column}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Offending column name.
        column: String,
        /// Frame row count.
        expected: usize,
        /// Provided column length.
        actual: usize,
    },

    /// A required column is missing.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A column has an unexpected storage type.
    #[error("Invalid column type for {column}: expected {expected}")]
    InvalidColumnType {
        /// Offending column name.
        column: String,
        /// Expected storage type.
        expected: &'static str,
    },

    /// Frames being concatenated do not share a schema.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}
