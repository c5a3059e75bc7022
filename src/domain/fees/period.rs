//! Calendar helpers: the `YearMonth` settlement period and lenient date parsing

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared::errors::DomainError;

/// Date format used by every persisted date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        // Rejects month 0/13 and years chrono cannot represent.
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DomainError;

    /// Accepts `YYYY-MM`, and also a full `YYYY-MM-DD` date (its month is taken).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(date) = parse_date(s) {
            return Ok(Self::of(date));
        }
        let invalid = || DomainError::Validation(format!("invalid year-month: {:?}", s));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a `YYYY-MM-DD` date, returning `None` for blank or malformed input.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Parse a year-month, returning `None` for blank or malformed input.
pub fn parse_year_month(s: &str) -> Option<YearMonth> {
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn parses_and_displays() {
        let ym: YearMonth = "2025-06".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 6);
        assert_eq!(ym.to_string(), "2025-06");
    }

    #[test]
    fn parses_full_date_as_its_month() {
        let ym: YearMonth = "2025-02-14".parse().unwrap();
        assert_eq!(ym.to_string(), "2025-02");
    }

    #[test]
    fn rejects_garbage() {
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("June".parse::<YearMonth>().is_err());
        assert!(parse_year_month("").is_none());
    }

    #[test]
    fn month_bounds() {
        let feb_leap: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(feb_leap.first_day(), date("2024-02-01"));
        assert_eq!(feb_leap.last_day(), date("2024-02-29"));

        let dec: YearMonth = "2025-12".parse().unwrap();
        assert_eq!(dec.last_day(), date("2025-12-31"));
    }

    #[test]
    fn contains_checks_month() {
        let june: YearMonth = "2025-06".parse().unwrap();
        assert!(june.contains(date("2025-06-30")));
        assert!(!june.contains(date("2025-07-01")));
    }

    #[test]
    fn serde_uses_string_form() {
        let ym: YearMonth = "2025-06".parse().unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2025-06\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }

    #[test]
    fn parse_date_is_lenient_about_blanks() {
        assert!(parse_date("").is_none());
        assert!(parse_date("2025-02-30").is_none());
        assert_eq!(parse_date(" 2025-06-01 "), Some(date("2025-06-01")));
    }
}
