//! Microsecond-precision UTC timestamps with the store's ISO-8601 rendering.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Rendering used by `to_dict` and the file store.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Failure to parse a timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {value:?}: expected YYYY-MM-DDTHH:MM:SS.ffffff or RFC 3339")]
pub struct TimestampError {
    value: String,
}

/// UTC instant truncated to microseconds.
///
/// Truncation happens on construction so a value survives a round trip
/// through text or PostgreSQL `timestamptz` unchanged.
///
/// # Examples
/// ```
/// use hbnb::domain::entities::Timestamp;
///
/// let ts = Timestamp::parse("2017-09-28T21:05:54.119427").expect("valid timestamp");
/// assert_eq!(ts.to_string(), "2017-09-28T21:05:54.119427");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap a chrono instant, dropping sub-microsecond precision.
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(6))
    }

    /// Underlying chrono instant.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Parse the store format (naive, assumed UTC) or RFC 3339.
    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::from_datetime(value.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(raw, PARSE_FORMAT)
            .map(|naive| Self::from_datetime(naive.and_utc()))
            .map_err(|_| TimestampError {
                value: raw.to_owned(),
            })
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_datetime(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
