use chrono::{Datelike, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time of day '{input}', expected HH:MM on a 24-hour clock")]
pub struct ParseTimeError {
    pub input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid month {0}, expected a value between 1 and 12")]
pub struct ParseMonthError(pub i64);

/// A wall-clock time with minute precision.
///
/// Stored as minutes since midnight, so ordering and comparisons are plain
/// integer comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    /// Last representable minute of the day, `23:59`.
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(MINUTES_PER_DAY - 1);

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(TimeOfDay((hour * 60 + minute) as u16))
        } else {
            None
        }
    }

    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        TimeOfDay((t.hour() * 60 + t.minute()) as u16)
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| ParseTimeError {
            input: s.to_string(),
        })?;
        Ok(TimeOfDay::from_timelike(&parsed))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Calendar month, always within `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Month(u8);

impl Month {
    pub fn new(month: i64) -> Result<Self, ParseMonthError> {
        if (1..=12).contains(&month) {
            Ok(Month(month as u8))
        } else {
            Err(ParseMonthError(month))
        }
    }

    pub fn from_datelike<D: Datelike>(d: &D) -> Self {
        Month(d.month() as u8)
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Month {
    type Error = ParseMonthError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Month::new(value)
    }
}

impl From<Month> for u8 {
    fn from(value: Month) -> Self {
        value.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
