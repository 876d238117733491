//! Station expense models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An operating expense paid by the station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: Uuid,
    pub station_id: String,
    pub expense_date: NaiveDate,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "expense_category", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Salary,
    Maintenance,
    Utilities,
    Supplies,
    Transport,
    Other,
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseCategory::Salary => write!(f, "Salary"),
            ExpenseCategory::Maintenance => write!(f, "Maintenance"),
            ExpenseCategory::Utilities => write!(f, "Utilities"),
            ExpenseCategory::Supplies => write!(f, "Supplies"),
            ExpenseCategory::Transport => write!(f, "Transport"),
            ExpenseCategory::Other => write!(f, "Other"),
        }
    }
}
