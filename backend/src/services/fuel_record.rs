//! Daily pump meter readings
//!
//! Sales volume and sales amount are derived from the readings and the
//! product price on every write and stored with the row.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::price::PriceService;
use shared::calculations::{sales_volume, total_sales};
use shared::models::{FuelRecord, ProductType};
use shared::validation::{validate_meter_readings, validate_price, validate_station_id};

const FUEL_RECORD_COLUMNS: &str = "fr.id, fr.station_id, fr.pump_id, fr.product_type, \
                                   fr.record_date, fr.meter_opening, fr.meter_closing, \
                                   fr.sales_volume, fr.unit_price, fr.total_sales, fr.notes, \
                                   fr.created_at, fr.updated_at";

/// Fuel record service for pump readings
#[derive(Clone)]
pub struct FuelRecordService {
    db: PgPool,
}

/// Input for recording a pump reading
#[derive(Debug, Deserialize, Validate)]
pub struct RecordReadingInput {
    #[validate(length(min = 1, max = 64, message = "Station ID is required"))]
    pub station_id: String,
    pub pump_id: Uuid,
    /// Defaults to today
    pub record_date: Option<NaiveDate>,
    pub meter_opening: Decimal,
    pub meter_closing: Decimal,
    /// Defaults to the station's configured price for the pump's product
    pub unit_price: Option<Decimal>,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Input for correcting a pump reading
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReadingInput {
    pub meter_opening: Option<Decimal>,
    pub meter_closing: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
}

/// Sales derived from a pair of meter readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingSales {
    pub sales_volume: Decimal,
    pub total_sales: Decimal,
}

impl ReadingSales {
    /// Validate the readings and price, then derive volume and amount
    pub fn compute(
        meter_opening: Decimal,
        meter_closing: Decimal,
        unit_price: Decimal,
    ) -> AppResult<Self> {
        validate_meter_readings(meter_opening, meter_closing)
            .map_err(|m| AppError::validation("meter_closing", m))?;
        validate_price(unit_price).map_err(|m| AppError::validation("unit_price", m))?;

        let volume = sales_volume(meter_opening, meter_closing)
            .ok_or_else(|| AppError::validation("meter_closing", "Meter readings are out of range"))?;
        let amount = total_sales(volume, unit_price)
            .ok_or_else(|| AppError::validation("unit_price", "Sales amount is out of range"))?;

        Ok(Self {
            sales_volume: volume,
            total_sales: amount,
        })
    }
}

impl FuelRecordService {
    /// Create a new FuelRecordService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a daily reading for a pump
    pub async fn record_reading(&self, input: RecordReadingInput) -> AppResult<FuelRecord> {
        input.validate()?;
        validate_station_id(&input.station_id)
            .map_err(|m| AppError::validation("station_id", m))?;
        validate_meter_readings(input.meter_opening, input.meter_closing)
            .map_err(|m| AppError::validation("meter_closing", m))?;

        let product_type = sqlx::query_scalar::<_, ProductType>(
            "SELECT product_type FROM pumps WHERE id = $1 AND station_id = $2",
        )
        .bind(input.pump_id)
        .bind(&input.station_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Pump".to_string()))?;

        let unit_price = match input.unit_price {
            Some(price) => price,
            None => {
                PriceService::new(self.db.clone())
                    .get_price(&input.station_id, product_type)
                    .await?
                    .price
            }
        };

        let sales = ReadingSales::compute(input.meter_opening, input.meter_closing, unit_price)?;
        let record_date = input.record_date.unwrap_or_else(|| Utc::now().date_naive());

        let record = sqlx::query_as::<_, FuelRecord>(&format!(
            r#"
            INSERT INTO fuel_records AS fr (
                station_id, pump_id, product_type, record_date, meter_opening, meter_closing,
                sales_volume, unit_price, total_sales, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {FUEL_RECORD_COLUMNS}
            "#
        ))
        .bind(&input.station_id)
        .bind(input.pump_id)
        .bind(product_type)
        .bind(record_date)
        .bind(input.meter_opening)
        .bind(input.meter_closing)
        .bind(sales.sales_volume)
        .bind(unit_price)
        .bind(sales.total_sales)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            AppError::from_insert(
                e,
                "fuel_records",
                format!("A reading for this pump already exists on {}", record_date),
            )
        })?;

        tracing::debug!(
            station_id = %record.station_id,
            pump_id = %record.pump_id,
            volume = %record.sales_volume,
            "Pump reading recorded"
        );

        Ok(record)
    }

    /// Correct a reading; derived values are recomputed from the merged fields
    pub async fn update_reading(
        &self,
        record_id: Uuid,
        input: UpdateReadingInput,
    ) -> AppResult<FuelRecord> {
        input.validate()?;

        let existing = sqlx::query_as::<_, FuelRecord>(&format!(
            "SELECT {FUEL_RECORD_COLUMNS} FROM fuel_records fr WHERE fr.id = $1"
        ))
        .bind(record_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Fuel record".to_string()))?;

        let meter_opening = input.meter_opening.unwrap_or(existing.meter_opening);
        let meter_closing = input.meter_closing.unwrap_or(existing.meter_closing);
        let unit_price = input.unit_price.unwrap_or(existing.unit_price);
        let notes = input.notes.or(existing.notes);

        let sales = ReadingSales::compute(meter_opening, meter_closing, unit_price)?;

        let record = sqlx::query_as::<_, FuelRecord>(&format!(
            r#"
            UPDATE fuel_records AS fr
            SET meter_opening = $1, meter_closing = $2, unit_price = $3,
                sales_volume = $4, total_sales = $5, notes = $6, updated_at = NOW()
            WHERE fr.id = $7
            RETURNING {FUEL_RECORD_COLUMNS}
            "#
        ))
        .bind(meter_opening)
        .bind(meter_closing)
        .bind(unit_price)
        .bind(sales.sales_volume)
        .bind(sales.total_sales)
        .bind(&notes)
        .bind(record_id)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    /// Readings of a station for one day, ordered by pump name
    pub async fn list_readings(
        &self,
        station_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<FuelRecord>> {
        let records = sqlx::query_as::<_, FuelRecord>(&format!(
            r#"
            SELECT {FUEL_RECORD_COLUMNS}
            FROM fuel_records fr
            JOIN pumps p ON p.id = fr.pump_id
            WHERE fr.station_id = $1 AND fr.record_date = $2
            ORDER BY p.name
            "#
        ))
        .bind(station_id)
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }
}
