//! Pump, price and daily meter reading models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProductType;

/// A dispenser at a station, dedicated to one product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Pump {
    pub id: Uuid,
    pub station_id: String,
    /// Display label (e.g., "Pump 3")
    pub name: String,
    pub product_type: ProductType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Current selling price of a product at a station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductPrice {
    pub id: Uuid,
    pub station_id: String,
    pub product_type: ProductType,
    /// Price per litre
    pub price: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Daily meter reading for one pump
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FuelRecord {
    pub id: Uuid,
    pub station_id: String,
    pub pump_id: Uuid,
    pub product_type: ProductType,
    pub record_date: NaiveDate,
    pub meter_opening: Decimal,
    pub meter_closing: Decimal,
    /// `meter_closing - meter_opening`
    pub sales_volume: Decimal,
    pub unit_price: Decimal,
    /// `sales_volume * unit_price`
    pub total_sales: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
