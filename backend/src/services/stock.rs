//! Monthly stock reconciliation
//!
//! Each (station, product, month) moves through `Open -> Reconciled`:
//! - initialize: opening stock carried forward from last month's measured
//!   closing stock, or zero when last month was never reconciled
//! - estimate: advisory closing stock from recorded pump sales
//! - finalize: measured closing stock and excess written in one update

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::repository::{PgSalesLedger, PgStockRepository, SalesLedger, StockRepository};
use crate::services::notification::{NotificationKind, NotificationSink, TracingNotifier};
use shared::calculations::{estimated_closing_stock, stock_excess, sum_sales_volume};
use shared::models::{NewStockPeriod, PeriodKey, ProductType, StockEstimate, StockPeriodRecord};
use shared::validation::{parse_quantity, validate_quantity, validate_station_id};

/// Stock reconciliation service
#[derive(Clone)]
pub struct StockService {
    repository: Arc<dyn StockRepository>,
    ledger: Arc<dyn SalesLedger>,
    notifier: Arc<dyn NotificationSink>,
}

/// Outcome of opening a period for every product at once
#[derive(Debug, Clone, Serialize)]
pub struct PeriodInitialization {
    pub period_key: PeriodKey,
    pub created: Vec<StockPeriodRecord>,
    /// Products whose period was already open
    pub skipped: Vec<ProductType>,
}

impl StockService {
    pub fn new(
        repository: Arc<dyn StockRepository>,
        ledger: Arc<dyn SalesLedger>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            repository,
            ledger,
            notifier,
        }
    }

    /// Service backed by `monthly_stock` and `fuel_records`
    pub fn postgres(db: PgPool) -> Self {
        Self::new(
            Arc::new(PgStockRepository::new(db.clone())),
            Arc::new(PgSalesLedger::new(db)),
            Arc::new(TracingNotifier),
        )
    }

    /// Open a stock period for one product.
    ///
    /// Never overwrites: an existing record for the key is reported as
    /// `Conflict`.
    pub async fn initialize_period(
        &self,
        station_id: &str,
        product_type: ProductType,
        period_key: PeriodKey,
    ) -> AppResult<StockPeriodRecord> {
        let result = self
            .open_period(station_id, product_type, period_key)
            .await;

        match &result {
            Ok(record) => self.notifier.notify(
                NotificationKind::Success,
                &format!(
                    "Initialized {} stock for {} with opening stock {}",
                    product_type, period_key, record.opening_stock
                ),
            ),
            Err(e) => self.notifier.notify(
                NotificationKind::Error,
                &format!("Failed to initialize {} stock: {}", product_type, e),
            ),
        }

        result
    }

    /// Open the period for every product, skipping products already open
    pub async fn initialize_all_products(
        &self,
        station_id: &str,
        period_key: PeriodKey,
    ) -> AppResult<PeriodInitialization> {
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        for product_type in ProductType::ALL {
            match self.open_period(station_id, product_type, period_key).await {
                Ok(record) => created.push(record),
                Err(AppError::Conflict { .. }) => skipped.push(product_type),
                Err(e) => {
                    self.notifier.notify(
                        NotificationKind::Error,
                        &format!("Failed to initialize stock for {}: {}", period_key, e),
                    );
                    return Err(e);
                }
            }
        }

        self.notifier.notify(
            NotificationKind::Success,
            &format!(
                "Initialized stock for {}: {} opened, {} already open",
                period_key,
                created.len(),
                skipped.len()
            ),
        );

        Ok(PeriodInitialization {
            period_key,
            created,
            skipped,
        })
    }

    async fn open_period(
        &self,
        station_id: &str,
        product_type: ProductType,
        period_key: PeriodKey,
    ) -> AppResult<StockPeriodRecord> {
        validate_station_id(station_id).map_err(|m| AppError::validation("station_id", m))?;

        if self
            .repository
            .find_by_key(station_id, product_type, period_key)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "monthly_stock",
                format!(
                    "{} stock for {} is already initialized for {}",
                    product_type, station_id, period_key
                ),
            ));
        }

        let previous_key = period_key
            .previous()
            .ok_or_else(|| AppError::validation("period_key", "Period is out of range"))?;

        let opening_stock = self
            .repository
            .find_by_key(station_id, product_type, previous_key)
            .await?
            .map(|previous| previous.carried_forward())
            .unwrap_or(Decimal::ZERO);

        let record = self
            .repository
            .insert(NewStockPeriod {
                station_id: station_id.to_string(),
                product_type,
                period_key,
                opening_stock,
            })
            .await?;

        tracing::info!(
            station_id,
            product = %product_type,
            period = %period_key,
            opening_stock = %record.opening_stock,
            "Stock period opened"
        );

        Ok(record)
    }

    /// Project closing stock from recorded sales.
    ///
    /// Advisory only: nothing is written, and any lookup failure yields a
    /// zero estimate instead of an error.
    pub async fn estimate_closing_stock(
        &self,
        station_id: &str,
        product_type: ProductType,
        period_key: PeriodKey,
    ) -> StockEstimate {
        match self.try_estimate(station_id, product_type, period_key).await {
            Ok(estimate) => estimate,
            Err(e) => {
                tracing::warn!(
                    station_id,
                    product = %product_type,
                    period = %period_key,
                    error = %e,
                    "Stock estimate unavailable, falling back to zero"
                );
                StockEstimate::zero()
            }
        }
    }

    async fn try_estimate(
        &self,
        station_id: &str,
        product_type: ProductType,
        period_key: PeriodKey,
    ) -> AppResult<StockEstimate> {
        let end = period_key
            .end_exclusive()
            .ok_or_else(|| AppError::validation("period_key", "Period is out of range"))?;

        let entries = self
            .ledger
            .find_sales_in_range(station_id, product_type, period_key.start(), end)
            .await?;
        let total_sales_volume = sum_sales_volume(&entries)
            .ok_or_else(|| AppError::validation("sales_volume", "Recorded sales overflow"))?;

        let opening_stock = self
            .repository
            .find_by_key(station_id, product_type, period_key)
            .await?
            .map(|r| r.opening_stock)
            .unwrap_or(Decimal::ZERO);

        let estimated = estimated_closing_stock(opening_stock, total_sales_volume)
            .ok_or_else(|| AppError::validation("sales_volume", "Recorded sales overflow"))?;

        Ok(StockEstimate {
            total_sales_volume,
            estimated_closing_stock: estimated,
        })
    }

    /// Reconcile a period from a closing stock typed by the operator.
    ///
    /// Malformed input is rejected before anything is read or written.
    pub async fn finalize_period_from_input(
        &self,
        record_id: Uuid,
        actual_closing_stock: &str,
    ) -> AppResult<StockPeriodRecord> {
        let closing = match parse_quantity(actual_closing_stock) {
            Ok(value) => value,
            Err(e) => {
                let err = AppError::validation("actual_closing_stock", e.to_string());
                self.notifier.notify(
                    NotificationKind::Error,
                    &format!("Failed to reconcile stock: {}", err),
                );
                return Err(err);
            }
        };

        self.finalize_period(record_id, closing).await
    }

    /// Record the measured closing stock and derived excess.
    ///
    /// A negative excess (shortage) is a valid outcome. The closing stock must
    /// fit the stored precision so the persisted excess stays exact.
    /// Reconciling a period twice is rejected with `Conflict`.
    pub async fn finalize_period(
        &self,
        record_id: Uuid,
        actual_closing_stock: Decimal,
    ) -> AppResult<StockPeriodRecord> {
        let result = self.reconcile(record_id, actual_closing_stock).await;

        match &result {
            Ok(record) => self.notifier.notify(
                NotificationKind::Success,
                &format!(
                    "Reconciled {} stock for {}: excess {}",
                    record.product_type,
                    record.period_key,
                    record.excess.unwrap_or(Decimal::ZERO)
                ),
            ),
            Err(e) => self.notifier.notify(
                NotificationKind::Error,
                &format!("Failed to reconcile stock: {}", e),
            ),
        }

        result
    }

    async fn reconcile(
        &self,
        record_id: Uuid,
        actual_closing_stock: Decimal,
    ) -> AppResult<StockPeriodRecord> {
        validate_quantity(actual_closing_stock)
            .map_err(|m| AppError::validation("actual_closing_stock", m))?;

        let record = self
            .repository
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stock period".to_string()))?;

        if record.is_reconciled() {
            return Err(AppError::conflict(
                "monthly_stock",
                format!(
                    "{} stock for {} is already reconciled",
                    record.product_type, record.period_key
                ),
            ));
        }

        let excess = stock_excess(record.opening_stock, actual_closing_stock)
            .filter(|excess| validate_quantity(*excess).is_ok())
            .ok_or_else(|| {
                AppError::validation("actual_closing_stock", "Resulting excess is out of range")
            })?;
        let updated = self
            .repository
            .update_reconciliation(record_id, actual_closing_stock, excess)
            .await?;

        tracing::info!(
            record_id = %record_id,
            product = %updated.product_type,
            period = %updated.period_key,
            closing = %actual_closing_stock,
            excess = %excess,
            "Stock period reconciled"
        );

        Ok(updated)
    }

    /// Stock records of a station for one period, ordered by product
    pub async fn list_period(
        &self,
        station_id: &str,
        period_key: PeriodKey,
    ) -> AppResult<Vec<StockPeriodRecord>> {
        self.repository.list_for_period(station_id, period_key).await
    }

    pub async fn get_record(&self, record_id: Uuid) -> AppResult<StockPeriodRecord> {
        self.repository
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stock period".to_string()))
    }
}
