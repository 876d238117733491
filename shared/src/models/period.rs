//! Calendar-month period keys
//!
//! A period is identified by the first day of its month. All month
//! arithmetic goes through a `year * 12 + month` index so that stepping
//! never lands on a day that does not exist (e.g. the 31st of a short month).

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::types::ParseError;

/// First calendar day of a month, used as the identity of a stock period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
pub struct PeriodKey(NaiveDate);

impl PeriodKey {
    /// Period containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date - Duration::days(i64::from(date.day0())))
    }

    pub fn from_ymd(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// First day of the period (inclusive)
    pub fn start(&self) -> NaiveDate {
        self.0
    }

    /// First day of the following period, or `None` past the calendar range
    pub fn end_exclusive(&self) -> Option<NaiveDate> {
        self.next().map(|p| p.0)
    }

    /// Step `months` whole months forward (negative steps backward)
    pub fn checked_add_months(&self, months: i32) -> Option<Self> {
        let index = i64::from(self.year()) * 12 + i64::from(self.month0()) + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
        Self::from_ymd(year, month)
    }

    pub fn previous(&self) -> Option<Self> {
        self.checked_add_months(-1)
    }

    pub fn next(&self) -> Option<Self> {
        self.checked_add_months(1)
    }

    fn month0(&self) -> u32 {
        self.0.month0()
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for PeriodKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

/// Accepts `YYYY-MM` or any `YYYY-MM-DD` inside the month
impl FromStr for PeriodKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }
        NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ParseError::InvalidPeriod(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
