//! Timestamp conversion.

use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// Convert a millisecond epoch timestamp exactly, without rounding.
pub fn millis_to_timestamp(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or(Error::TimestampRange(ms))
}
