//! Daily summary of sales and expenses
//! Aggregation happens in SQL; merging the two result sets per day is a pure
//! function so it can be checked without a database.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use shared::models::{DailySummary, ProductSales, ProductType};
use shared::types::DateRange;

/// Daily summary service
#[derive(Clone)]
pub struct SummaryService {
    db: PgPool,
    max_days: i64,
}

/// Sales of one product on one day
#[derive(Debug, Clone, FromRow)]
pub struct DailySalesRow {
    pub record_date: NaiveDate,
    pub product_type: ProductType,
    pub sales_volume: Decimal,
    pub sales_amount: Decimal,
}

/// Expenses of one day
#[derive(Debug, Clone, FromRow)]
pub struct DailyExpenseRow {
    pub expense_date: NaiveDate,
    pub total_expenses: Decimal,
}

/// One CSV line per day with a column pair per product
#[derive(Debug, Serialize)]
struct DailySummaryCsvRow {
    date: NaiveDate,
    pms_volume: Decimal,
    pms_amount: Decimal,
    ago_volume: Decimal,
    ago_amount: Decimal,
    dpk_volume: Decimal,
    dpk_amount: Decimal,
    total_sales_amount: Decimal,
    total_expenses: Decimal,
    net: Decimal,
}

impl SummaryService {
    pub fn new(db: PgPool, max_days: i64) -> Self {
        Self { db, max_days }
    }

    /// Per-day totals for a station over an inclusive date range
    pub async fn daily_summary(
        &self,
        station_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<DailySummary>> {
        let range = summary_range(start, end, self.max_days)?;

        let sales = sqlx::query_as::<_, DailySalesRow>(
            r#"
            SELECT record_date, product_type,
                   COALESCE(SUM(sales_volume), 0) AS sales_volume,
                   COALESCE(SUM(total_sales), 0) AS sales_amount
            FROM fuel_records
            WHERE station_id = $1 AND record_date BETWEEN $2 AND $3
            GROUP BY record_date, product_type
            ORDER BY record_date, product_type
            "#,
        )
        .bind(station_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        let expenses = sqlx::query_as::<_, DailyExpenseRow>(
            r#"
            SELECT expense_date, COALESCE(SUM(amount), 0) AS total_expenses
            FROM expenses
            WHERE station_id = $1 AND expense_date BETWEEN $2 AND $3
            GROUP BY expense_date
            ORDER BY expense_date
            "#,
        )
        .bind(station_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        Ok(build_daily_summaries(&sales, &expenses))
    }

    /// Export daily summaries to CSV format
    pub fn export_to_csv(summaries: &[DailySummary]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for summary in summaries {
            let product = |p: ProductType| {
                summary
                    .products
                    .iter()
                    .find(|s| s.product_type == p)
                    .map(|s| (s.sales_volume, s.sales_amount))
                    .unwrap_or((Decimal::ZERO, Decimal::ZERO))
            };
            let (pms_volume, pms_amount) = product(ProductType::Pms);
            let (ago_volume, ago_amount) = product(ProductType::Ago);
            let (dpk_volume, dpk_amount) = product(ProductType::Dpk);

            wtr.serialize(DailySummaryCsvRow {
                date: summary.date,
                pms_volume,
                pms_amount,
                ago_volume,
                ago_amount,
                dpk_volume,
                dpk_amount,
                total_sales_amount: summary.total_sales_amount,
                total_expenses: summary.total_expenses,
                net: summary.net,
            })
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

/// Check a requested summary range
pub fn summary_range(start: NaiveDate, end: NaiveDate, max_days: i64) -> AppResult<DateRange> {
    let range = DateRange::new(start, end)
        .ok_or_else(|| AppError::validation("start", "Start date must not be after end date"))?;
    if range.days() > max_days {
        return Err(AppError::validation(
            "end",
            format!("Summary range cannot exceed {} days", max_days),
        ));
    }
    Ok(range)
}

/// Merge per-product sales and expenses into one summary per active day,
/// ascending by date
pub fn build_daily_summaries(
    sales: &[DailySalesRow],
    expenses: &[DailyExpenseRow],
) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

    for row in sales {
        let day = days
            .entry(row.record_date)
            .or_insert_with(|| empty_day(row.record_date));
        match day
            .products
            .iter_mut()
            .find(|p| p.product_type == row.product_type)
        {
            Some(product) => {
                product.sales_volume += row.sales_volume;
                product.sales_amount += row.sales_amount;
            }
            None => day.products.push(ProductSales {
                product_type: row.product_type,
                sales_volume: row.sales_volume,
                sales_amount: row.sales_amount,
            }),
        }
        day.total_sales_amount += row.sales_amount;
    }

    for row in expenses {
        let day = days
            .entry(row.expense_date)
            .or_insert_with(|| empty_day(row.expense_date));
        day.total_expenses += row.total_expenses;
    }

    days.into_values()
        .map(|mut day| {
            day.products.sort_by_key(|p| p.product_type);
            day.net = day.total_sales_amount - day.total_expenses;
            day
        })
        .collect()
}

fn empty_day(date: NaiveDate) -> DailySummary {
    DailySummary {
        date,
        products: Vec::new(),
        total_sales_amount: Decimal::ZERO,
        total_expenses: Decimal::ZERO,
        net: Decimal::ZERO,
    }
}
