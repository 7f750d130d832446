//! Date/hour partition keys.
//!
//! Every candle maps to exactly one `(calendar date, hour-of-day)` pair
//! derived from its open time in UTC. The object-name layout is fixed
//! for compatibility with existing partitions:
//! `raw/date=YYYY-MM-DD/hour=HH/data.parquet` and
//! `processed/date=YYYY-MM-DD/hour=HH/features.parquet`.

use chrono::{DateTime, Datelike, NaiveDate, Timelike};

use crate::error::StorageError;

/// Key prefix for raw candle partitions.
pub const RAW_PREFIX: &str = "raw/";
/// Key prefix for processed feature partitions.
pub const PROCESSED_PREFIX: &str = "processed/";

const RAW_FILE: &str = "data.parquet";
const FEATURES_FILE: &str = "features.parquet";

/// One storage partition: a calendar date and an hour of day (0-23),
/// both in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartitionKey {
    /// UTC calendar date.
    pub date: NaiveDate,
    /// Hour of day, 0-23.
    pub hour: u32,
}

impl PartitionKey {
    /// Derives the partition key for a millisecond-epoch open time.
    ///
    /// # Errors
    /// - [`StorageError::InvalidTimestamp`] when the value is outside
    ///   the representable UTC range.
    pub fn from_open_time_ms(open_time_ms: i64) -> Result<Self, StorageError> {
        let datetime = DateTime::from_timestamp_millis(open_time_ms)
            .ok_or(StorageError::InvalidTimestamp(open_time_ms))?;
        Ok(Self {
            date: NaiveDate::from_ymd_opt(datetime.year(), datetime.month(), datetime.day())
                .ok_or(StorageError::InvalidTimestamp(open_time_ms))?,
            hour: datetime.hour(),
        })
    }

    /// Object name of the raw candle blob for this partition.
    #[must_use]
    pub fn raw_object(&self) -> String {
        format!("{RAW_PREFIX}date={}/hour={:02}/{RAW_FILE}", self.date, self.hour)
    }

    /// Object name of the processed feature blob for this partition.
    #[must_use]
    pub fn features_object(&self) -> String {
        format!(
            "{PROCESSED_PREFIX}date={}/hour={:02}/{FEATURES_FILE}",
            self.date, self.hour
        )
    }

    /// Extracts the partition date from an object name, if present.
    #[must_use]
    pub fn parse_date(object_name: &str) -> Option<NaiveDate> {
        let segment = object_name
            .split('/')
            .find_map(|part| part.strip_prefix("date="))?;
        segment.parse().ok()
    }
}

impl std::fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "date={}/hour={:02}", self.date, self.hour)
    }
}
