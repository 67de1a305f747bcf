//! # Temporal Types — UTC Timestamps
//!
//! Defines [`Timestamp`], the UTC wall-clock type stamped onto a tree node
//! at construction and on every audit.
//!
//! Audit stamps are ordering hints for operators reading diagnostics and
//! stats, not canonical bytes, so millisecond precision is kept as-is.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WardenError;

/// A UTC timestamp with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from Unix epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidTimestamp`] if the value is outside the
    /// representable range.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, WardenError> {
        DateTime::from_timestamp_millis(millis)
            .map(Self)
            .ok_or(WardenError::InvalidTimestamp(millis))
    }

    /// Unix epoch milliseconds.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
