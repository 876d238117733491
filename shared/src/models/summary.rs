//! Daily summary models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductType;

/// Sales and expenses for one day at a station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub products: Vec<ProductSales>,
    pub total_sales_amount: Decimal,
    pub total_expenses: Decimal,
    /// `total_sales_amount - total_expenses`
    pub net: Decimal,
}

/// Sales of one product on one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSales {
    pub product_type: ProductType,
    pub sales_volume: Decimal,
    pub sales_amount: Decimal,
}
