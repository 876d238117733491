//! Common types used across the dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing user-supplied identifiers and amounts
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown product type: {0}")]
    UnknownProduct(String),

    #[error("invalid period: {0} (expected YYYY-MM or YYYY-MM-DD)")]
    InvalidPeriod(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
}

/// Inclusive date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range from `start` to `end`, both inclusive; `None` if reversed
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Number of calendar days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
