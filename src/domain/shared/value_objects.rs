//! Shared value objects used across the call log

use super::error::DomainError;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wire and storage format of a call timestamp
pub const CALL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Moment a call was issued, second precision, local wall clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallTimestamp(NaiveDateTime);

impl CallTimestamp {
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Self(now.with_nanosecond(0).unwrap_or(now))
    }

    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Parse `YYYY-MM-DD HH:MM:SS`; anything else is a validation error
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        NaiveDateTime::parse_from_str(value, CALL_DATETIME_FORMAT)
            .map(Self)
            .map_err(|_| {
                DomainError::validation(
                    "'call_datetime' must match format YYYY-MM-DD HH:MM:SS",
                )
            })
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl Default for CallTimestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for CallTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CALL_DATETIME_FORMAT))
    }
}

impl Serialize for CallTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CallTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CallTimestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}
