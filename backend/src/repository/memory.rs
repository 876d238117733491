//! In-memory repositories
//!
//! Same contracts as the PostgreSQL implementations, including the
//! uniqueness and single-reconciliation guarantees, held behind a mutex.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{SalesLedger, StockRepository};
use crate::error::{AppError, AppResult};
use shared::models::{NewStockPeriod, PeriodKey, ProductType, SalesEntry, StockPeriodRecord};

/// Stock records keyed by id
#[derive(Default)]
pub struct InMemoryStockRepository {
    records: Mutex<HashMap<Uuid, StockPeriodRecord>>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record as-is, e.g. a reconciled period from before go-live
    pub fn seed(&self, record: StockPeriodRecord) {
        self.lock().insert(record.id, record);
    }

    /// Every stored record, in no particular order
    pub fn snapshot(&self) -> Vec<StockPeriodRecord> {
        self.lock().values().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, StockPeriodRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn same_key(
    record: &StockPeriodRecord,
    station_id: &str,
    product_type: ProductType,
    period_key: PeriodKey,
) -> bool {
    record.station_id == station_id
        && record.product_type == product_type
        && record.period_key == period_key
}

#[async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn find_by_key(
        &self,
        station_id: &str,
        product_type: ProductType,
        period_key: PeriodKey,
    ) -> AppResult<Option<StockPeriodRecord>> {
        Ok(self
            .lock()
            .values()
            .find(|r| same_key(r, station_id, product_type, period_key))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StockPeriodRecord>> {
        Ok(self.lock().get(&id).cloned())
    }

    async fn list_for_period(
        &self,
        station_id: &str,
        period_key: PeriodKey,
    ) -> AppResult<Vec<StockPeriodRecord>> {
        let mut records: Vec<StockPeriodRecord> = self
            .lock()
            .values()
            .filter(|r| r.station_id == station_id && r.period_key == period_key)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.product_type);
        Ok(records)
    }

    async fn insert(&self, record: NewStockPeriod) -> AppResult<StockPeriodRecord> {
        let mut records = self.lock();
        let exists = records.values().any(|r| {
            same_key(r, &record.station_id, record.product_type, record.period_key)
        });
        if exists {
            return Err(AppError::conflict(
                "monthly_stock",
                format!(
                    "{} stock for {} is already initialized for {}",
                    record.product_type, record.station_id, record.period_key
                ),
            ));
        }

        let now = Utc::now();
        let created = StockPeriodRecord {
            id: Uuid::new_v4(),
            station_id: record.station_id,
            product_type: record.product_type,
            period_key: record.period_key,
            opening_stock: record.opening_stock,
            actual_closing_stock: None,
            excess: None,
            created_at: now,
            updated_at: now,
        };
        records.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_reconciliation(
        &self,
        id: Uuid,
        actual_closing_stock: Decimal,
        excess: Decimal,
    ) -> AppResult<StockPeriodRecord> {
        let mut records = self.lock();
        let record = records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Stock period".to_string()))?;

        if record.actual_closing_stock.is_some() {
            return Err(AppError::conflict(
                "monthly_stock",
                "Stock period is already reconciled",
            ));
        }

        record.actual_closing_stock = Some(actual_closing_stock);
        record.excess = Some(excess);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

/// Dated sales entries for a station and product
#[derive(Default)]
pub struct InMemorySalesLedger {
    entries: Mutex<Vec<(String, ProductType, NaiveDate, SalesEntry)>>,
}

impl InMemorySalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &self,
        station_id: &str,
        product_type: ProductType,
        date: NaiveDate,
        sales_volume: Option<Decimal>,
    ) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((
                station_id.to_string(),
                product_type,
                date,
                SalesEntry { sales_volume },
            ));
    }
}

#[async_trait]
impl SalesLedger for InMemorySalesLedger {
    async fn find_sales_in_range(
        &self,
        station_id: &str,
        product_type: ProductType,
        start_inclusive: NaiveDate,
        end_exclusive: NaiveDate,
    ) -> AppResult<Vec<SalesEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(station, product, date, _)| {
                station == station_id
                    && *product == product_type
                    && *date >= start_inclusive
                    && *date < end_exclusive
            })
            .map(|(_, _, _, entry)| *entry)
            .collect())
    }
}
