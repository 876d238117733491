//! Monthly stock reconciliation tests
//!
//! Drives the stock service against in-memory repositories:
//! - Property: opening stock equals last month's measured closing stock
//! - Property: excess is opening minus measured closing
//! - Property: estimates never write and never fail

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use fuel_station_dashboard_backend::error::{AppError, AppResult};
use fuel_station_dashboard_backend::repository::{
    InMemorySalesLedger, InMemoryStockRepository, SalesLedger, StockRepository,
};
use fuel_station_dashboard_backend::services::{
    NotificationKind, RecordingNotifier, StockService,
};
use shared::models::{
    NewStockPeriod, PeriodKey, ProductType, SalesEntry, StockPeriodRecord, StockPeriodStatus,
};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn period(s: &str) -> PeriodKey {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Harness {
    repository: Arc<InMemoryStockRepository>,
    ledger: Arc<InMemorySalesLedger>,
    notifier: Arc<RecordingNotifier>,
    service: StockService,
}

fn harness() -> Harness {
    let repository = Arc::new(InMemoryStockRepository::new());
    let ledger = Arc::new(InMemorySalesLedger::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let service = StockService::new(repository.clone(), ledger.clone(), notifier.clone());
    Harness {
        repository,
        ledger,
        notifier,
        service,
    }
}

fn reconciled(
    station_id: &str,
    product_type: ProductType,
    period_key: PeriodKey,
    opening: Decimal,
    closing: Decimal,
) -> StockPeriodRecord {
    let now = Utc::now();
    StockPeriodRecord {
        id: Uuid::new_v4(),
        station_id: station_id.to_string(),
        product_type,
        period_key,
        opening_stock: opening,
        actual_closing_stock: Some(closing),
        excess: Some(opening - closing),
        created_at: now,
        updated_at: now,
    }
}

fn open_record(
    station_id: &str,
    product_type: ProductType,
    period_key: PeriodKey,
    opening: Decimal,
) -> StockPeriodRecord {
    StockPeriodRecord {
        actual_closing_stock: None,
        excess: None,
        ..reconciled(station_id, product_type, period_key, opening, Decimal::ZERO)
    }
}

fn store_offline() -> AppError {
    AppError::DependencyFailure("stock store offline".to_string())
}

/// Store whose every call fails
struct UnavailableStockRepository;

#[async_trait]
impl StockRepository for UnavailableStockRepository {
    async fn find_by_key(
        &self,
        _station_id: &str,
        _product_type: ProductType,
        _period_key: PeriodKey,
    ) -> AppResult<Option<StockPeriodRecord>> {
        Err(store_offline())
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<StockPeriodRecord>> {
        Err(store_offline())
    }

    async fn list_for_period(
        &self,
        _station_id: &str,
        _period_key: PeriodKey,
    ) -> AppResult<Vec<StockPeriodRecord>> {
        Err(store_offline())
    }

    async fn insert(&self, _record: NewStockPeriod) -> AppResult<StockPeriodRecord> {
        Err(store_offline())
    }

    async fn update_reconciliation(
        &self,
        _id: Uuid,
        _actual_closing_stock: Decimal,
        _excess: Decimal,
    ) -> AppResult<StockPeriodRecord> {
        Err(store_offline())
    }
}

/// Reads succeed but the reconciliation write fails
struct RejectingUpdates {
    inner: Arc<InMemoryStockRepository>,
}

/// Key lookups miss records another writer has already inserted
struct StaleKeyLookups {
    inner: Arc<InMemoryStockRepository>,
}

#[async_trait]
impl StockRepository for RejectingUpdates {
    async fn find_by_key(
        &self,
        station_id: &str,
        product_type: ProductType,
        period_key: PeriodKey,
    ) -> AppResult<Option<StockPeriodRecord>> {
        self.inner.find_by_key(station_id, product_type, period_key).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StockPeriodRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn list_for_period(
        &self,
        station_id: &str,
        period_key: PeriodKey,
    ) -> AppResult<Vec<StockPeriodRecord>> {
        self.inner.list_for_period(station_id, period_key).await
    }

    async fn insert(&self, record: NewStockPeriod) -> AppResult<StockPeriodRecord> {
        self.inner.insert(record).await
    }

    async fn update_reconciliation(
        &self,
        _id: Uuid,
        _actual_closing_stock: Decimal,
        _excess: Decimal,
    ) -> AppResult<StockPeriodRecord> {
        Err(store_offline())
    }
}

#[async_trait]
impl StockRepository for StaleKeyLookups {
    async fn find_by_key(
        &self,
        _station_id: &str,
        _product_type: ProductType,
        _period_key: PeriodKey,
    ) -> AppResult<Option<StockPeriodRecord>> {
        Ok(None)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StockPeriodRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn list_for_period(
        &self,
        station_id: &str,
        period_key: PeriodKey,
    ) -> AppResult<Vec<StockPeriodRecord>> {
        self.inner.list_for_period(station_id, period_key).await
    }

    async fn insert(&self, record: NewStockPeriod) -> AppResult<StockPeriodRecord> {
        self.inner.insert(record).await
    }

    async fn update_reconciliation(
        &self,
        id: Uuid,
        actual_closing_stock: Decimal,
        excess: Decimal,
    ) -> AppResult<StockPeriodRecord> {
        self.inner
            .update_reconciliation(id, actual_closing_stock, excess)
            .await
    }
}

/// Ledger whose every lookup fails
struct UnavailableLedger;

#[async_trait]
impl SalesLedger for UnavailableLedger {
    async fn find_sales_in_range(
        &self,
        _station_id: &str,
        _product_type: ProductType,
        _start_inclusive: NaiveDate,
        _end_exclusive: NaiveDate,
    ) -> AppResult<Vec<SalesEntry>> {
        Err(AppError::DependencyFailure("sales ledger offline".to_string()))
    }
}

// ============================================================================
// Initialize
// ============================================================================

#[tokio::test]
async fn test_initialize_cold_start_opens_at_zero() {
    let h = harness();

    let record = h
        .service
        .initialize_period("S1", ProductType::Pms, period("2024-01"))
        .await
        .unwrap();

    assert_eq!(record.opening_stock, Decimal::ZERO);
    assert_eq!(record.period_key, period("2024-01-01"));
    assert_eq!(record.actual_closing_stock, None);
    assert_eq!(record.excess, None);
    assert_eq!(record.status(), StockPeriodStatus::Open);
    assert_eq!(h.notifier.count(NotificationKind::Success), 1);
}

#[tokio::test]
async fn test_initialize_carries_forward_previous_closing() {
    let h = harness();
    h.repository.seed(reconciled(
        "S1",
        ProductType::Ago,
        period("2023-12"),
        dec("800"),
        dec("320.5"),
    ));

    let record = h
        .service
        .initialize_period("S1", ProductType::Ago, period("2024-01"))
        .await
        .unwrap();

    assert_eq!(record.opening_stock, dec("320.5"));
}

#[tokio::test]
async fn test_initialize_ignores_unreconciled_previous_month() {
    let h = harness();
    h.service
        .initialize_period("S1", ProductType::Dpk, period("2024-01"))
        .await
        .unwrap();

    let february = h
        .service
        .initialize_period("S1", ProductType::Dpk, period("2024-02"))
        .await
        .unwrap();

    assert_eq!(february.opening_stock, Decimal::ZERO);
}

#[tokio::test]
async fn test_initialize_twice_is_conflict_and_keeps_record() {
    let h = harness();
    let first = h
        .service
        .initialize_period("S1", ProductType::Pms, period("2024-01"))
        .await
        .unwrap();

    let second = h
        .service
        .initialize_period("S1", ProductType::Pms, period("2024-01-20"))
        .await;

    assert!(matches!(second, Err(AppError::Conflict { .. })));
    let stored = h.repository.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, first.id);
    assert_eq!(h.notifier.count(NotificationKind::Error), 1);
}

#[tokio::test]
async fn test_initialize_rejects_blank_station() {
    let h = harness();

    let result = h
        .service
        .initialize_period("  ", ProductType::Pms, period("2024-01"))
        .await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
    assert!(h.repository.snapshot().is_empty());
}

#[tokio::test]
async fn test_stations_and_products_are_isolated() {
    let h = harness();
    h.repository.seed(reconciled(
        "S1",
        ProductType::Pms,
        period("2024-01"),
        dec("1000"),
        dec("150"),
    ));

    let other_station = h
        .service
        .initialize_period("S2", ProductType::Pms, period("2024-02"))
        .await
        .unwrap();
    let other_product = h
        .service
        .initialize_period("S1", ProductType::Ago, period("2024-02"))
        .await
        .unwrap();

    assert_eq!(other_station.opening_stock, Decimal::ZERO);
    assert_eq!(other_product.opening_stock, Decimal::ZERO);
}

#[tokio::test]
async fn test_initialize_all_products_skips_open_periods() {
    let h = harness();
    h.service
        .initialize_period("S1", ProductType::Ago, period("2024-03"))
        .await
        .unwrap();

    let result = h
        .service
        .initialize_all_products("S1", period("2024-03"))
        .await
        .unwrap();

    let created: Vec<ProductType> = result.created.iter().map(|r| r.product_type).collect();
    assert_eq!(created, vec![ProductType::Pms, ProductType::Dpk]);
    assert_eq!(result.skipped, vec![ProductType::Ago]);
    assert_eq!(h.repository.snapshot().len(), 3);

    let listed = h.service.list_period("S1", period("2024-03")).await.unwrap();
    let products: Vec<ProductType> = listed.iter().map(|r| r.product_type).collect();
    assert_eq!(products, ProductType::ALL.to_vec());
}

// ============================================================================
// Estimate
// ============================================================================

#[tokio::test]
async fn test_estimate_counts_only_sales_inside_month() {
    let h = harness();
    h.repository.seed(reconciled(
        "S1",
        ProductType::Pms,
        period("2024-01"),
        dec("1000"),
        dec("150"),
    ));
    h.service
        .initialize_period("S1", ProductType::Pms, period("2024-02"))
        .await
        .unwrap();

    h.ledger.record("S1", ProductType::Pms, date(2024, 1, 31), Some(dec("500")));
    h.ledger.record("S1", ProductType::Pms, date(2024, 2, 1), Some(dec("25")));
    h.ledger.record("S1", ProductType::Pms, date(2024, 2, 29), Some(dec("35")));
    h.ledger.record("S1", ProductType::Pms, date(2024, 2, 10), None);
    h.ledger.record("S1", ProductType::Ago, date(2024, 2, 10), Some(dec("999")));
    h.ledger.record("S1", ProductType::Pms, date(2024, 3, 1), Some(dec("70")));

    let estimate = h
        .service
        .estimate_closing_stock("S1", ProductType::Pms, period("2024-02"))
        .await;

    assert_eq!(estimate.total_sales_volume, dec("60"));
    assert_eq!(estimate.estimated_closing_stock, dec("90"));
}

#[tokio::test]
async fn test_estimate_without_record_uses_zero_opening() {
    let h = harness();
    h.ledger.record("S1", ProductType::Dpk, date(2024, 5, 3), Some(dec("40")));

    let estimate = h
        .service
        .estimate_closing_stock("S1", ProductType::Dpk, period("2024-05"))
        .await;

    assert_eq!(estimate.total_sales_volume, dec("40"));
    assert_eq!(estimate.estimated_closing_stock, dec("-40"));
    assert!(h.repository.snapshot().is_empty());
}

#[tokio::test]
async fn test_estimate_falls_back_to_zero_when_ledger_fails() {
    let repository = Arc::new(InMemoryStockRepository::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let service = StockService::new(repository, Arc::new(UnavailableLedger), notifier.clone());

    let estimate = service
        .estimate_closing_stock("S1", ProductType::Pms, period("2024-02"))
        .await;

    assert_eq!(estimate.total_sales_volume, Decimal::ZERO);
    assert_eq!(estimate.estimated_closing_stock, Decimal::ZERO);
    assert!(notifier.messages().is_empty());
}

// ============================================================================
// Finalize
// ============================================================================

#[tokio::test]
async fn test_month_to_month_scenario() {
    let h = harness();
    let january = h
        .service
        .initialize_period("S1", ProductType::Pms, period("2024-01"))
        .await
        .unwrap();
    let mut january = january;
    // Opening stock of the first month is set at go-live
    january.opening_stock = dec("1000");
    h.repository.seed(january.clone());

    let closed = h
        .service
        .finalize_period_from_input(january.id, "150")
        .await
        .unwrap();
    assert_eq!(closed.actual_closing_stock, Some(dec("150")));
    assert_eq!(closed.excess, Some(dec("850")));
    assert_eq!(closed.status(), StockPeriodStatus::Reconciled);

    let february = h
        .service
        .initialize_period("S1", ProductType::Pms, period("2024-02"))
        .await
        .unwrap();
    assert_eq!(february.opening_stock, dec("150"));

    h.ledger.record("S1", ProductType::Pms, date(2024, 2, 5), Some(dec("60")));
    let estimate = h
        .service
        .estimate_closing_stock("S1", ProductType::Pms, period("2024-02"))
        .await;
    assert_eq!(estimate.total_sales_volume, dec("60"));
    assert_eq!(estimate.estimated_closing_stock, dec("90"));
}

#[tokio::test]
async fn test_finalize_shortage_gives_negative_excess() {
    let h = harness();
    let mut record = h
        .service
        .initialize_period("S1", ProductType::Ago, period("2024-04"))
        .await
        .unwrap();
    record.opening_stock = dec("500");
    h.repository.seed(record.clone());

    let closed = h.service.finalize_period(record.id, dec("600")).await.unwrap();

    assert_eq!(closed.excess, Some(dec("-100")));
    assert_eq!(closed.opening_stock, dec("500"));
}

#[tokio::test]
async fn test_finalize_twice_is_conflict() {
    let h = harness();
    let record = h
        .service
        .initialize_period("S1", ProductType::Dpk, period("2024-01"))
        .await
        .unwrap();
    h.service.finalize_period(record.id, dec("10")).await.unwrap();

    let again = h.service.finalize_period(record.id, dec("20")).await;

    assert!(matches!(again, Err(AppError::Conflict { .. })));
    let stored = h.service.get_record(record.id).await.unwrap();
    assert_eq!(stored.actual_closing_stock, Some(dec("10")));
    assert_eq!(stored.excess, Some(dec("-10")));
}

#[tokio::test]
async fn test_finalize_unknown_record_is_not_found() {
    let h = harness();

    let result = h.service.finalize_period(Uuid::new_v4(), dec("10")).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(h.notifier.count(NotificationKind::Error), 1);
}

#[tokio::test]
async fn test_finalize_malformed_input_writes_nothing() {
    let h = harness();
    let record = h
        .service
        .initialize_period("S1", ProductType::Pms, period("2024-01"))
        .await
        .unwrap();

    for raw in ["", "abc", "12..5", "NaN"] {
        let result = h.service.finalize_period_from_input(record.id, raw).await;
        assert!(
            matches!(result, Err(AppError::Validation { .. })),
            "input {:?} should be rejected",
            raw
        );
    }

    let stored = h.service.get_record(record.id).await.unwrap();
    assert_eq!(stored.actual_closing_stock, None);
    assert_eq!(stored.excess, None);
    assert_eq!(h.notifier.count(NotificationKind::Error), 4);
}

#[tokio::test]
async fn test_finalize_accepts_formatted_input() {
    let h = harness();
    let record = h
        .service
        .initialize_period("S1", ProductType::Pms, period("2024-01"))
        .await
        .unwrap();

    let closed = h
        .service
        .finalize_period_from_input(record.id, " 1,250.75 ")
        .await
        .unwrap();

    assert_eq!(closed.actual_closing_stock, Some(dec("1250.75")));
    assert_eq!(closed.excess, Some(dec("-1250.75")));
}

#[tokio::test]
async fn test_finalize_rejects_more_precision_than_stored() {
    let h = harness();
    let record = open_record("S1", ProductType::Pms, period("2024-01"), dec("1000"));
    h.repository.seed(record.clone());

    let result = h
        .service
        .finalize_period_from_input(record.id, "150.1235")
        .await;

    assert!(matches!(result, Err(AppError::Validation { ref field, .. }) if field == "actual_closing_stock"));
    let stored = h.service.get_record(record.id).await.unwrap();
    assert_eq!(stored.actual_closing_stock, None);
    assert_eq!(stored.excess, None);

    // Trailing zeros beyond the stored scale are harmless
    let closed = h
        .service
        .finalize_period_from_input(record.id, "150.1230")
        .await
        .unwrap();
    assert_eq!(closed.actual_closing_stock, Some(dec("150.123")));
    assert_eq!(closed.excess, Some(dec("849.877")));
    assert_eq!(
        closed.excess,
        Some(closed.opening_stock - closed.actual_closing_stock.unwrap())
    );
}

#[tokio::test]
async fn test_finalize_rejects_out_of_range_quantities() {
    let h = harness();
    let record = open_record("S1", ProductType::Ago, period("2024-01"), dec("1000"));
    h.repository.seed(record.clone());

    for raw in ["1000000000000000", "-1000000000000000", "79228162514264337593543950335"] {
        let result = h.service.finalize_period_from_input(record.id, raw).await;
        assert!(
            matches!(result, Err(AppError::Validation { .. })),
            "input {:?} should be rejected",
            raw
        );
    }

    let stored = h.service.get_record(record.id).await.unwrap();
    assert_eq!(stored.status(), StockPeriodStatus::Open);
}

#[tokio::test]
async fn test_finalize_overflowing_excess_is_validation_error() {
    let h = harness();
    // Legacy row holding an opening stock no form could produce
    let record = open_record("S1", ProductType::Pms, period("2024-02"), Decimal::MAX);
    h.repository.seed(record.clone());

    let result = h.service.finalize_period(record.id, dec("-1")).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
    let stored = h.service.get_record(record.id).await.unwrap();
    assert_eq!(stored.excess, None);
    assert_eq!(h.notifier.count(NotificationKind::Error), 1);
}

#[tokio::test]
async fn test_estimate_overflowing_sales_falls_back_to_zero() {
    let h = harness();
    h.ledger.record("S1", ProductType::Dpk, date(2024, 3, 1), Some(Decimal::MAX));
    h.ledger.record("S1", ProductType::Dpk, date(2024, 3, 2), Some(Decimal::MAX));

    let estimate = h
        .service
        .estimate_closing_stock("S1", ProductType::Dpk, period("2024-03"))
        .await;

    assert_eq!(estimate.total_sales_volume, Decimal::ZERO);
    assert_eq!(estimate.estimated_closing_stock, Decimal::ZERO);
}

// ============================================================================
// Store Failures
// ============================================================================

fn service_over(repository: Arc<dyn StockRepository>) -> (StockService, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let service = StockService::new(
        repository,
        Arc::new(InMemorySalesLedger::new()),
        notifier.clone(),
    );
    (service, notifier)
}

#[tokio::test]
async fn test_initialize_propagates_store_failure() {
    let (service, notifier) = service_over(Arc::new(UnavailableStockRepository));

    let result = service
        .initialize_period("S1", ProductType::Pms, period("2024-01"))
        .await;

    assert!(matches!(result, Err(AppError::DependencyFailure(_))));
    assert_eq!(notifier.count(NotificationKind::Error), 1);
    assert_eq!(notifier.count(NotificationKind::Success), 0);

    let all = service.initialize_all_products("S1", period("2024-01")).await;
    assert!(matches!(all, Err(AppError::DependencyFailure(_))));
    assert_eq!(notifier.count(NotificationKind::Error), 2);
}

#[tokio::test]
async fn test_finalize_propagates_store_failure() {
    let inner = Arc::new(InMemoryStockRepository::new());
    let record = open_record("S1", ProductType::Ago, period("2024-01"), dec("500"));
    inner.seed(record.clone());
    let (service, notifier) = service_over(Arc::new(RejectingUpdates {
        inner: inner.clone(),
    }));

    let result = service.finalize_period(record.id, dec("450")).await;

    assert!(matches!(result, Err(AppError::DependencyFailure(_))));
    assert_eq!(notifier.count(NotificationKind::Error), 1);
    let stored = inner.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.actual_closing_stock, None);
    assert_eq!(stored.excess, None);

    let (offline, _) = service_over(Arc::new(UnavailableStockRepository));
    let result = offline.finalize_period(record.id, dec("450")).await;
    assert!(matches!(result, Err(AppError::DependencyFailure(_))));
}

#[tokio::test]
async fn test_estimate_falls_back_to_zero_when_store_fails() {
    let ledger = Arc::new(InMemorySalesLedger::new());
    ledger.record("S1", ProductType::Pms, date(2024, 2, 3), Some(dec("40")));
    let notifier = Arc::new(RecordingNotifier::new());
    let service = StockService::new(
        Arc::new(UnavailableStockRepository),
        ledger,
        notifier.clone(),
    );

    let estimate = service
        .estimate_closing_stock("S1", ProductType::Pms, period("2024-02"))
        .await;

    assert_eq!(estimate.total_sales_volume, Decimal::ZERO);
    assert_eq!(estimate.estimated_closing_stock, Decimal::ZERO);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_insert_race_is_conflict() {
    let inner = Arc::new(InMemoryStockRepository::new());
    let existing = open_record("S1", ProductType::Pms, period("2024-01"), dec("75"));
    inner.seed(existing.clone());
    let (service, notifier) = service_over(Arc::new(StaleKeyLookups {
        inner: inner.clone(),
    }));

    let result = service
        .initialize_period("S1", ProductType::Pms, period("2024-01"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
    assert_eq!(notifier.count(NotificationKind::Error), 1);
    let stored = inner.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], existing);

    let all = service
        .initialize_all_products("S1", period("2024-01"))
        .await
        .unwrap();
    assert_eq!(all.skipped, vec![ProductType::Pms]);
    assert_eq!(all.created.len(), 2);
    assert_eq!(inner.snapshot().len(), 3);
}

// ============================================================================
// Property Tests
// ============================================================================

fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000, 0u32..4).prop_map(|(units, scale)| Decimal::new(units, scale))
}

fn product_strategy() -> impl Strategy<Value = ProductType> {
    prop_oneof![
        Just(ProductType::Pms),
        Just(ProductType::Ago),
        Just(ProductType::Dpk),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Next month's opening stock is this month's measured closing stock
    #[test]
    fn prop_opening_carries_forward(
        product in product_strategy(),
        opening in quantity_strategy(),
        closing in quantity_strategy(),
        year in 2000i32..2100,
        month in 1u32..=12,
    ) {
        let h = harness();
        let key = PeriodKey::from_ymd(year, month).unwrap();
        h.repository.seed(reconciled("S1", product, key, opening, closing));

        let next = tokio_test::block_on(
            h.service.initialize_period("S1", product, key.next().unwrap()),
        )
        .unwrap();

        prop_assert_eq!(next.opening_stock, closing);
    }

    /// Excess is opening minus measured closing, sign included
    #[test]
    fn prop_excess_is_opening_minus_closing(
        opening in quantity_strategy(),
        closing in quantity_strategy(),
    ) {
        let h = harness();
        let mut record = tokio_test::block_on(
            h.service.initialize_period("S1", ProductType::Pms, period("2024-06")),
        )
        .unwrap();
        record.opening_stock = opening;
        h.repository.seed(record.clone());

        let closed = tokio_test::block_on(h.service.finalize_period(record.id, closing)).unwrap();

        prop_assert_eq!(closed.excess, Some(opening - closing));
        prop_assert_eq!(closed.opening_stock, opening);
    }

    /// Estimates equal opening minus the month's recorded sales
    #[test]
    fn prop_estimate_matches_recorded_sales(
        sales in prop::collection::vec(quantity_strategy(), 0..20),
    ) {
        let h = harness();
        for (i, volume) in sales.iter().enumerate() {
            h.ledger.record("S1", ProductType::Ago, date(2024, 7, 1 + (i as u32 % 31)), Some(*volume));
        }
        let total: Decimal = sales.iter().copied().sum();

        let estimate = tokio_test::block_on(
            h.service.estimate_closing_stock("S1", ProductType::Ago, period("2024-07")),
        );

        prop_assert_eq!(estimate.total_sales_volume, total);
        prop_assert_eq!(estimate.estimated_closing_stock, -total);
        prop_assert!(h.repository.snapshot().is_empty());
    }
}
