//! Validation utilities for the Fuel Station Dashboard

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::types::ParseError;

/// Longest station identifier accepted
pub const MAX_STATION_ID_LEN: usize = 64;

/// Longest expense description accepted, after trimming
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Decimal places stored for stock and meter quantities (`NUMERIC(18, 3)`)
pub const QUANTITY_SCALE: u32 = 3;

/// Decimal places stored for prices and amounts
pub const MONEY_SCALE: u32 = 2;

/// Quantities must stay strictly below this magnitude
const QUANTITY_LIMIT: i64 = 1_000_000_000_000_000;

/// Prices must stay strictly below this magnitude (`NUMERIC(14, 2)`)
const PRICE_LIMIT: i64 = 1_000_000_000_000;

// ============================================================================
// Quantity Parsing
// ============================================================================

/// Parse a quantity typed into a form field.
///
/// Accepts plain and scientific decimal notation with an optional sign and
/// thousands separators (`"12,500.75"`). Blank input, `NaN` and infinities
/// are rejected. Negative values are allowed; callers that need a sign
/// restriction check it separately.
pub fn parse_quantity(raw: &str) -> Result<Decimal, ParseError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    if cleaned.is_empty() {
        return Err(ParseError::InvalidQuantity(raw.to_string()));
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| ParseError::InvalidQuantity(raw.to_string()))
}

// ============================================================================
// Field Validations
// ============================================================================

/// Validate an opaque station identifier
pub fn validate_station_id(station_id: &str) -> Result<(), &'static str> {
    let trimmed = station_id.trim();
    if trimmed.is_empty() {
        return Err("Station ID is required");
    }
    if trimmed.len() > MAX_STATION_ID_LEN {
        return Err("Station ID is too long");
    }
    if trimmed != station_id {
        return Err("Station ID must not have surrounding whitespace");
    }
    Ok(())
}

/// Validate a stock or meter quantity against the stored precision.
///
/// More than three decimal places would be rounded by the store, breaking
/// any value derived from the unrounded input.
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity.normalize().scale() > QUANTITY_SCALE {
        return Err("Quantities can have at most 3 decimal places");
    }
    if quantity.abs() >= Decimal::from(QUANTITY_LIMIT) {
        return Err("Quantity is out of range");
    }
    Ok(())
}

/// Validate a pair of pump meter readings
pub fn validate_meter_readings(opening: Decimal, closing: Decimal) -> Result<(), &'static str> {
    if opening < Decimal::ZERO || closing < Decimal::ZERO {
        return Err("Meter readings cannot be negative");
    }
    validate_quantity(opening)?;
    validate_quantity(closing)?;
    if closing < opening {
        return Err("Closing meter reading cannot be below the opening reading");
    }
    Ok(())
}

/// Validate a per-litre selling price
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Price must be positive");
    }
    if price.normalize().scale() > MONEY_SCALE {
        return Err("Price can have at most 2 decimal places");
    }
    if price >= Decimal::from(PRICE_LIMIT) {
        return Err("Price is out of range");
    }
    Ok(())
}

/// Validate an expense amount
pub fn validate_expense_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Expense amount must be positive");
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err("Expense amount can have at most 2 decimal places");
    }
    if amount >= Decimal::from(PRICE_LIMIT) {
        return Err("Expense amount is out of range");
    }
    Ok(())
}

/// Validate an expense description as it will be stored
pub fn validate_description(description: &str) -> Result<(), &'static str> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err("Description is required");
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err("Description must be at most 255 characters");
    }
    Ok(())
}
