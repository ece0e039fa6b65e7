//! Plain calendar dates used for enrollment and course windows.
//!
//! A [`Date`] is a (day, month, year) triple. No calendar validity is
//! enforced, so `31-2-2025` is accepted and compares like any other value.
//! Ordering is year, then month, then day.

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AulaError, Result};

// Field order drives the derived ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i32,
    month: i32,
    day: i32,
}

impl Date {
    pub fn new(day: i32, month: i32, year: i32) -> Self {
        Self { year, month, day }
    }

    /// The current local date.
    pub fn today() -> Self {
        let now = chrono::Local::now().date_naive();
        Self::new(now.day() as i32, now.month() as i32, now.year())
    }

    pub fn day(&self) -> i32 {
        self.day
    }

    pub fn month(&self) -> i32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn is_before(&self, other: &Date) -> bool {
        self < other
    }

    pub fn is_after(&self, other: &Date) -> bool {
        self > other
    }

    /// Inclusive of both endpoints.
    pub fn is_between(&self, start: &Date, end: &Date) -> bool {
        !self.is_before(start) && !self.is_after(end)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.day, self.month, self.year)
    }
}

impl std::str::FromStr for Date {
    type Err = AulaError;

    /// Accepts `D-M-Y` as well as zero-padded `DD-MM-YYYY`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(AulaError::InvalidFormat(format!("invalid date: {}", s)));
        }

        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| AulaError::InvalidFormat(format!("invalid date: {}", s)))
        };

        Ok(Date::new(parse(parts[0])?, parse(parts[1])?, parse(parts[2])?))
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
