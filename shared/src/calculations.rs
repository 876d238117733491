//! Derived values shown on the dashboard and persisted alongside their inputs
//!
//! Every formula returns `None` instead of overflowing.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::SalesEntry;
use crate::validation::MONEY_SCALE;

/// Litres dispensed between two meter readings
pub fn sales_volume(meter_opening: Decimal, meter_closing: Decimal) -> Option<Decimal> {
    meter_closing.checked_sub(meter_opening)
}

/// Sales amount for a dispensed volume, rounded half away from zero to the
/// stored money scale
pub fn total_sales(volume: Decimal, unit_price: Decimal) -> Option<Decimal> {
    volume.checked_mul(unit_price).map(|amount| {
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    })
}

/// Opening stock minus measured closing stock.
/// Positive is a surplus, negative a shortage.
pub fn stock_excess(opening_stock: Decimal, actual_closing_stock: Decimal) -> Option<Decimal> {
    opening_stock.checked_sub(actual_closing_stock)
}

/// Closing stock projected from the opening stock and recorded sales
pub fn estimated_closing_stock(
    opening_stock: Decimal,
    total_sales_volume: Decimal,
) -> Option<Decimal> {
    opening_stock.checked_sub(total_sales_volume)
}

/// Total volume of a set of ledger entries; missing volumes count as zero
pub fn sum_sales_volume<'a, I>(entries: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a SalesEntry>,
{
    entries.into_iter().try_fold(Decimal::ZERO, |total, e| {
        total.checked_add(e.sales_volume.unwrap_or(Decimal::ZERO))
    })
}
