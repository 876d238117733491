//! Storage seams for the stock reconciliation engine
//!
//! The engine only talks to these traits. PostgreSQL implementations back the
//! running server; in-memory implementations back tests and local tooling.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::AppResult;
use shared::models::{NewStockPeriod, PeriodKey, ProductType, SalesEntry, StockPeriodRecord};

pub mod memory;
pub mod postgres;

pub use memory::{InMemorySalesLedger, InMemoryStockRepository};
pub use postgres::{PgSalesLedger, PgStockRepository};

/// Persistence for monthly stock records (`monthly_stock`)
#[async_trait]
pub trait StockRepository: Send + Sync {
    async fn find_by_key(
        &self,
        station_id: &str,
        product_type: ProductType,
        period_key: PeriodKey,
    ) -> AppResult<Option<StockPeriodRecord>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StockPeriodRecord>>;

    /// Records of one station for one period, ordered by product
    async fn list_for_period(
        &self,
        station_id: &str,
        period_key: PeriodKey,
    ) -> AppResult<Vec<StockPeriodRecord>>;

    /// Insert a new open record.
    /// Fails with `Conflict` when the (station, product, period) key exists.
    async fn insert(&self, record: NewStockPeriod) -> AppResult<StockPeriodRecord>;

    /// Write closing stock and excess in one update.
    /// Fails with `NotFound` for an unknown id and `Conflict` when the record
    /// is already reconciled.
    async fn update_reconciliation(
        &self,
        id: Uuid,
        actual_closing_stock: Decimal,
        excess: Decimal,
    ) -> AppResult<StockPeriodRecord>;
}

/// Read access to recorded pump sales
#[async_trait]
pub trait SalesLedger: Send + Sync {
    /// Entries for a station and product with `start <= date < end`
    async fn find_sales_in_range(
        &self,
        station_id: &str,
        product_type: ProductType,
        start_inclusive: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> AppResult<Vec<SalesEntry>>;
}
