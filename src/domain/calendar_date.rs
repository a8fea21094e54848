use crate::domain::errors::{CalendarError, CalendarResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Calendar date in canonical `yyyy-MM-dd` form.
///
/// All `days` map keys and wire values go through this type, so a key that
/// parses is guaranteed to round-trip byte-for-byte. Weekday numbering is
/// 0=Sunday..6=Saturday, matching the `weekend_days` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Strict parse: the input must be exactly the canonical rendering.
    /// Shorthand like `2024-1-1` is rejected, not normalized.
    pub fn parse(value: &str) -> CalendarResult<Self> {
        let date = NaiveDate::parse_from_str(value, Self::FORMAT)
            .map_err(|_| CalendarError::InvalidDate(value.to_string()))?;
        let parsed = Self(date);
        if parsed.to_string() != value {
            return Err(CalendarError::InvalidDate(value.to_string()));
        }
        Ok(parsed)
    }

    pub fn inner(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month_day(&self) -> MonthDay {
        MonthDay {
            month: self.0.month(),
            day: self.0.day(),
        }
    }

    /// 0=Sunday..6=Saturday.
    pub fn weekday_number(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        CalendarDate::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Month-day pair used for recurring matching, in place of `MM-DD`
/// substring slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}
