//! HTTP handlers for the Fuel Station Dashboard API

pub mod expense;
pub mod fuel_record;
pub mod health;
pub mod price;
pub mod pump;
pub mod stock;
pub mod summary;

pub use expense::*;
pub use fuel_record::*;
pub use health::*;
pub use price::*;
pub use pump::*;
pub use stock::*;
pub use summary::*;

use crate::error::{AppError, AppResult};
use shared::models::{PeriodKey, ProductType};

/// Parse a `period` query or body field
pub(crate) fn parse_period(raw: &str) -> AppResult<PeriodKey> {
    raw.parse()
        .map_err(|e: shared::ParseError| AppError::validation("period", e.to_string()))
}

/// Parse a `product_type` query or body field
pub(crate) fn parse_product(raw: &str) -> AppResult<ProductType> {
    raw.parse()
        .map_err(|e: shared::ParseError| AppError::validation("product_type", e.to_string()))
}
