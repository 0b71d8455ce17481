//! Calendar date value with a canonical `YYYY-MM-DD` encoding.
//!
//! Dates are persisted as fixed-width text, so every `Date` this module hands
//! out must round-trip through its string form without loss. Years are
//! therefore limited to `0000..=9999`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{MusterError, Result};

/// Length of the canonical `YYYY-MM-DD` form.
const CANONICAL_LEN: usize = 10;

/// Largest year with a four-digit encoding.
const MAX_YEAR: i32 = 9999;

/// A calendar date (year, month, day) in `0000-01-01..=9999-12-31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// Build a date, rejecting out-of-range components and non-existent days.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        let candidate = format!("{:04}-{:02}-{:02}", year, month, day);
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(Self::in_range)
            .ok_or(MusterError::InvalidDate(candidate))
    }

    /// Strictly parse a `YYYY-MM-DD` string.
    ///
    /// Anything other than four digits, `-`, two digits, `-`, two digits naming
    /// a real calendar day fails with [`MusterError::InvalidDate`] carrying the
    /// offending input.
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || MusterError::InvalidDate(value.to_string());

        let bytes = value.as_bytes();
        if bytes.len() != CANONICAL_LEN {
            return Err(invalid());
        }
        for (i, b) in bytes.iter().enumerate() {
            let ok = match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            };
            if !ok {
                return Err(invalid());
            }
        }

        let year: i32 = value[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = value[5..7].parse().map_err(|_| invalid())?;
        let day: u32 = value[8..10].parse().map_err(|_| invalid())?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Today's date on the local wall clock.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// `Some` when `date` has a four-digit, non-negative year.
    fn in_range(date: NaiveDate) -> Option<Self> {
        (0..=MAX_YEAR).contains(&date.year()).then_some(Self(date))
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
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for Date {
    type Err = MusterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<NaiveDate> for Date {
    type Error = MusterError;

    /// Fails for years outside `0000..=9999`, which have no canonical form.
    fn try_from(date: NaiveDate) -> Result<Self> {
        Self::in_range(date).ok_or_else(|| MusterError::InvalidDate(date.to_string()))
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_zero_pads() {
        let date = Date::new(987, 3, 7).unwrap();
        assert_eq!(date.to_string(), "0987-03-07");
    }

    #[test]
    fn test_parse_round_trip() {
        for (y, m, d) in [(2024, 1, 15), (2024, 2, 29), (1999, 12, 31), (0, 1, 1), (9999, 12, 31)] {
            let date = Date::new(y, m, d).unwrap();
            assert_eq!(Date::parse(&date.to_string()).unwrap(), date);
        }
    }

    #[test]
    fn test_today_round_trips() {
        let today = Date::today();
        let parsed: Date = today.to_string().parse().unwrap();
        assert_eq!(parsed, today);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "",
            "abc",
            "2024-13-01",
            "2024-00-10",
            "2024-02-30",
            "2023-02-29",
            "2024-2-3",
            "2024/01/15",
            "2024-01-15 ",
            "24-01-15",
            "+024-01-15",
            "2024-01-1a",
            "２０２４-01-15",
        ] {
            match Date::parse(input) {
                Err(MusterError::InvalidDate(value)) => assert_eq!(value, input),
                other => panic!("expected InvalidDate for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Date::new(2024, 4, 31).is_err());
        assert!(Date::new(-1, 1, 1).is_err());
        assert!(Date::new(10000, 1, 1).is_err());
    }

    #[test]
    fn test_naive_date_conversion() {
        let naive = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let date = Date::try_from(naive).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 6, 1));
        assert_eq!(NaiveDate::from(date), naive);
    }

    #[test]
    fn test_naive_date_outside_four_digit_years_is_rejected() {
        for naive in [
            NaiveDate::from_ymd_opt(12345, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(-1, 12, 31).unwrap(),
        ] {
            match Date::try_from(naive) {
                Err(MusterError::InvalidDate(_)) => {}
                other => panic!("expected InvalidDate for {}, got {:?}", naive, other),
            }
        }

        let edge = Date::try_from(NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()).unwrap();
        assert_eq!(Date::parse(&edge.to_string()).unwrap(), edge);
    }
}
