//! Canonical `YYYY-MM-DD` keys for calendar days.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DaylogError;

const FORMAT: &str = "%Y-%m-%d";

/// A calendar day in local time, keyed as `YYYY-MM-DD`.
///
/// Ordering follows the calendar, so a `BTreeMap<DateKey, _>` iterates
/// (and serializes) oldest day first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DateKey)
    }

    /// Today's date in the local timezone.
    pub fn today() -> Self {
        DateKey(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Long form for headings, e.g. "Friday, March 15, 2024".
    pub fn display_long(&self) -> String {
        self.0.format("%A, %B %-d, %Y").to_string()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DaylogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono tolerates unpadded fields and stray spaces; only the exact
        // rendering of a date is a key
        let key = NaiveDate::parse_from_str(s, FORMAT)
            .map(DateKey)
            .map_err(|_| invalid_key(s))?;
        if key.to_string() != s {
            return Err(invalid_key(s));
        }
        Ok(key)
    }
}

fn invalid_key(s: &str) -> DaylogError {
    DaylogError::Validation(format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
