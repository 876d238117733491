//! WebAssembly module for the Fuel Station Dashboard
//!
//! Lets the browser preview what the server will compute:
//! - Sales volume and amount from pump meter readings
//! - Estimated closing stock and excess for a month
//! - Quantity parsing and period keys
//!
//! Quantities cross the boundary as decimal strings so no precision is lost.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

pub use shared::calculations;
pub use shared::models::{PeriodKey, ProductType};
pub use shared::validation::{
    parse_quantity, validate_meter_readings, validate_price, validate_quantity,
};

fn quantity(field: &str, raw: &str) -> Result<Decimal, String> {
    parse_quantity(raw).map_err(|e| format!("{}: {}", field, e))
}

fn to_js(err: String) -> JsValue {
    warn(&err);
    JsValue::from_str(&err)
}

fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn out_of_range() -> String {
    "Value is out of range".to_string()
}

fn reading_sales(opening: &str, closing: &str, unit_price: &str) -> Result<String, String> {
    let opening = quantity("meter_opening", opening)?;
    let closing = quantity("meter_closing", closing)?;
    let price = quantity("unit_price", unit_price)?;
    validate_meter_readings(opening, closing).map_err(str::to_string)?;
    validate_price(price).map_err(str::to_string)?;

    let volume = calculations::sales_volume(opening, closing).ok_or_else(out_of_range)?;
    let amount = calculations::total_sales(volume, price).ok_or_else(out_of_range)?;
    serde_json::to_string(&serde_json::json!({
        "sales_volume": volume.normalize().to_string(),
        "total_sales": amount.normalize().to_string(),
    }))
    .map_err(|e| e.to_string())
}

fn closing_estimate(opening_stock: &str, total_sales_volume: &str) -> Result<String, String> {
    let opening = quantity("opening_stock", opening_stock)?;
    let sales = quantity("total_sales_volume", total_sales_volume)?;
    calculations::estimated_closing_stock(opening, sales)
        .map(|estimate| estimate.normalize().to_string())
        .ok_or_else(out_of_range)
}

fn excess(opening_stock: &str, actual_closing_stock: &str) -> Result<String, String> {
    let opening = quantity("opening_stock", opening_stock)?;
    let closing = quantity("actual_closing_stock", actual_closing_stock)?;
    validate_quantity(closing).map_err(str::to_string)?;
    calculations::stock_excess(opening, closing)
        .map(|excess| excess.normalize().to_string())
        .ok_or_else(out_of_range)
}

fn period_before(period: &str) -> Result<String, String> {
    let key: PeriodKey = period.parse().map_err(|e: shared::ParseError| e.to_string())?;
    key.previous()
        .map(|p| p.to_string())
        .ok_or_else(|| "Period is out of range".to_string())
}

/// Sales volume and amount of one pump reading as JSON
#[wasm_bindgen]
pub fn calculate_reading_sales(
    meter_opening: &str,
    meter_closing: &str,
    unit_price: &str,
) -> Result<String, JsValue> {
    reading_sales(meter_opening, meter_closing, unit_price).map_err(to_js)
}

/// Opening stock minus the month's sales
#[wasm_bindgen]
pub fn calculate_estimated_closing_stock(
    opening_stock: &str,
    total_sales_volume: &str,
) -> Result<String, JsValue> {
    closing_estimate(opening_stock, total_sales_volume).map_err(to_js)
}

/// Opening stock minus the measured closing stock
#[wasm_bindgen]
pub fn calculate_stock_excess(
    opening_stock: &str,
    actual_closing_stock: &str,
) -> Result<String, JsValue> {
    excess(opening_stock, actual_closing_stock).map_err(to_js)
}

/// Normalized quantity, or an error for malformed input
#[wasm_bindgen]
pub fn normalize_quantity(raw: &str) -> Result<String, JsValue> {
    quantity("quantity", raw)
        .map(|q| q.normalize().to_string())
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn is_valid_quantity(raw: &str) -> bool {
    parse_quantity(raw).is_ok()
}

/// Key of the month before `period` (`YYYY-MM` or `YYYY-MM-DD`)
#[wasm_bindgen]
pub fn previous_period(period: &str) -> Result<String, JsValue> {
    period_before(period).map_err(to_js)
}

/// Key of the month the browser clock is in
#[wasm_bindgen]
pub fn current_period_key() -> String {
    let now = js_sys::Date::new_0();
    PeriodKey::from_ymd(now.get_full_year() as i32, now.get_month() + 1)
        .map(|p| p.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_sales() {
        let json = calculate_reading_sales("1000", "1250.5", "617").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sales_volume"], "250.5");
        assert_eq!(value["total_sales"], "154558.5");
    }

    #[test]
    fn test_reading_sales_rejects_rollback() {
        assert!(reading_sales("500", "400", "617").is_err());
        assert!(reading_sales("abc", "400", "617").is_err());
    }

    #[test]
    fn test_reading_sales_rejects_price_the_server_rejects() {
        assert!(reading_sales("400", "500", "0").is_err());
        assert!(reading_sales("400", "500", "-617").is_err());
        assert!(reading_sales("400", "500", "617.555").is_err());
    }

    #[test]
    fn test_stock_figures() {
        assert_eq!(calculate_estimated_closing_stock("150", "60").unwrap(), "90");
        assert_eq!(calculate_stock_excess("1000", "150").unwrap(), "850");
        assert_eq!(calculate_stock_excess("500", "600").unwrap(), "-100");
        assert!(excess("1000", "150.1235").is_err());
        assert!(excess("79228162514264337593543950335", "-1").is_err());
    }

    #[test]
    fn test_quantity_input() {
        assert_eq!(normalize_quantity("1,200.50").unwrap(), "1200.5");
        assert!(is_valid_quantity("42"));
        assert!(!is_valid_quantity("forty"));
        assert!(quantity("quantity", "").is_err());
    }

    #[test]
    fn test_previous_period() {
        assert_eq!(previous_period("2024-01").unwrap(), "2023-12-01");
        assert_eq!(previous_period("2024-03-15").unwrap(), "2024-02-01");
        assert!(period_before("2024-13").is_err());
    }
}
