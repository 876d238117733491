//! PostgreSQL-backed repositories

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{SalesLedger, StockRepository};
use crate::error::{AppError, AppResult};
use shared::models::{NewStockPeriod, PeriodKey, ProductType, SalesEntry, StockPeriodRecord};

const STOCK_COLUMNS: &str = "id, station_id, product_type, period_key, opening_stock, \
                             actual_closing_stock, excess, created_at, updated_at";

/// `monthly_stock` table access
#[derive(Clone)]
pub struct PgStockRepository {
    db: PgPool,
}

impl PgStockRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StockRepository for PgStockRepository {
    async fn find_by_key(
        &self,
        station_id: &str,
        product_type: ProductType,
        period_key: PeriodKey,
    ) -> AppResult<Option<StockPeriodRecord>> {
        let record = sqlx::query_as::<_, StockPeriodRecord>(&format!(
            "SELECT {STOCK_COLUMNS} FROM monthly_stock \
             WHERE station_id = $1 AND product_type = $2 AND period_key = $3"
        ))
        .bind(station_id)
        .bind(product_type)
        .bind(period_key)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StockPeriodRecord>> {
        let record = sqlx::query_as::<_, StockPeriodRecord>(&format!(
            "SELECT {STOCK_COLUMNS} FROM monthly_stock WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    async fn list_for_period(
        &self,
        station_id: &str,
        period_key: PeriodKey,
    ) -> AppResult<Vec<StockPeriodRecord>> {
        let records = sqlx::query_as::<_, StockPeriodRecord>(&format!(
            "SELECT {STOCK_COLUMNS} FROM monthly_stock \
             WHERE station_id = $1 AND period_key = $2 \
             ORDER BY product_type"
        ))
        .bind(station_id)
        .bind(period_key)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    async fn insert(&self, record: NewStockPeriod) -> AppResult<StockPeriodRecord> {
        sqlx::query_as::<_, StockPeriodRecord>(&format!(
            "INSERT INTO monthly_stock (station_id, product_type, period_key, opening_stock) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {STOCK_COLUMNS}"
        ))
        .bind(&record.station_id)
        .bind(record.product_type)
        .bind(record.period_key)
        .bind(record.opening_stock)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            AppError::from_insert(
                e,
                "monthly_stock",
                format!(
                    "{} stock for {} is already initialized for {}",
                    record.product_type, record.station_id, record.period_key
                ),
            )
        })
    }

    async fn update_reconciliation(
        &self,
        id: Uuid,
        actual_closing_stock: Decimal,
        excess: Decimal,
    ) -> AppResult<StockPeriodRecord> {
        // Conditional on the record still being open so two concurrent
        // finalizations cannot both succeed.
        let updated = sqlx::query_as::<_, StockPeriodRecord>(&format!(
            "UPDATE monthly_stock \
             SET actual_closing_stock = $1, excess = $2, updated_at = NOW() \
             WHERE id = $3 AND actual_closing_stock IS NULL \
             RETURNING {STOCK_COLUMNS}"
        ))
        .bind(actual_closing_stock)
        .bind(excess)
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        match updated {
            Some(record) => Ok(record),
            None => match self.find_by_id(id).await? {
                Some(_) => Err(AppError::conflict(
                    "monthly_stock",
                    "Stock period is already reconciled",
                )),
                None => Err(AppError::NotFound("Stock period".to_string())),
            },
        }
    }
}

/// Sales ledger over the `fuel_records` table
#[derive(Clone)]
pub struct PgSalesLedger {
    db: PgPool,
}

impl PgSalesLedger {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SalesLedger for PgSalesLedger {
    async fn find_sales_in_range(
        &self,
        station_id: &str,
        product_type: ProductType,
        start_inclusive: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> AppResult<Vec<SalesEntry>> {
        let entries = sqlx::query_as::<_, SalesEntry>(
            r#"
            SELECT sales_volume
            FROM fuel_records
            WHERE station_id = $1
              AND product_type = $2
              AND record_date >= $3
              AND record_date < $4
            "#,
        )
        .bind(station_id)
        .bind(product_type)
        .bind(start_inclusive)
        .bind(end_exclusive)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }
}
