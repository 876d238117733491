//! Monthly stock reconciliation models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PeriodKey, ProductType};

/// One month of stock for a single product at a single station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockPeriodRecord {
    pub id: Uuid,
    pub station_id: String,
    pub product_type: ProductType,
    pub period_key: PeriodKey,
    /// Carried in from the previous period's measured closing stock
    pub opening_stock: Decimal,
    /// Measured at period end; set together with `excess`
    pub actual_closing_stock: Option<Decimal>,
    /// `opening_stock - actual_closing_stock`; negative means shortage
    pub excess: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockPeriodRecord {
    pub fn status(&self) -> StockPeriodStatus {
        match (self.actual_closing_stock, self.excess) {
            (Some(_), Some(_)) => StockPeriodStatus::Reconciled,
            _ => StockPeriodStatus::Open,
        }
    }

    pub fn is_reconciled(&self) -> bool {
        self.status() == StockPeriodStatus::Reconciled
    }

    /// Opening stock for the period after this one
    pub fn carried_forward(&self) -> Decimal {
        self.actual_closing_stock.unwrap_or(Decimal::ZERO)
    }
}

/// Lifecycle of a stock period record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPeriodStatus {
    /// Opening stock set, closing stock not yet measured
    Open,
    /// Closing stock and excess recorded
    Reconciled,
}

/// Values needed to open a new stock period
#[derive(Debug, Clone, PartialEq)]
pub struct NewStockPeriod {
    pub station_id: String,
    pub product_type: ProductType,
    pub period_key: PeriodKey,
    pub opening_stock: Decimal,
}

/// Advisory closing-stock projection from recorded sales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StockEstimate {
    pub total_sales_volume: Decimal,
    pub estimated_closing_stock: Decimal,
}

impl StockEstimate {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A single sales-ledger entry as seen by stock estimation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SalesEntry {
    pub sales_volume: Option<Decimal>,
}
