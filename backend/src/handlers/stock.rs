//! HTTP handlers for monthly stock reconciliation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{parse_period, parse_product};
use crate::error::{AppError, AppResult};
use crate::services::stock::PeriodInitialization;
use crate::AppState;
use shared::models::{StockEstimate, StockPeriodRecord, StockPeriodStatus};

/// Query selecting one station's period
#[derive(Debug, Deserialize)]
pub struct StockPeriodQuery {
    pub station_id: String,
    /// `YYYY-MM` or any date inside the month
    pub period: String,
}

/// Query for a closing-stock estimate
#[derive(Debug, Deserialize)]
pub struct StockEstimateQuery {
    pub station_id: String,
    pub product_type: String,
    pub period: String,
}

/// Input for opening a period for one product
#[derive(Debug, Deserialize)]
pub struct InitializePeriodInput {
    pub station_id: String,
    pub product_type: String,
    pub period: String,
}

/// Input for opening a period for every product
#[derive(Debug, Deserialize)]
pub struct InitializeAllInput {
    pub station_id: String,
    pub period: String,
}

/// Input for reconciling a period; accepts a JSON number or numeric string
#[derive(Debug, Deserialize)]
pub struct FinalizePeriodInput {
    pub actual_closing_stock: serde_json::Value,
}

/// Stock record with its lifecycle status
#[derive(Debug, Serialize)]
pub struct StockPeriodResponse {
    #[serde(flatten)]
    pub record: StockPeriodRecord,
    pub status: StockPeriodStatus,
}

impl From<StockPeriodRecord> for StockPeriodResponse {
    fn from(record: StockPeriodRecord) -> Self {
        let status = record.status();
        Self { record, status }
    }
}

/// List stock records of a station for a period
pub async fn list_stock_period(
    State(state): State<AppState>,
    Query(query): Query<StockPeriodQuery>,
) -> AppResult<Json<Vec<StockPeriodResponse>>> {
    let period = parse_period(&query.period)?;
    let records = state.stock.list_period(&query.station_id, period).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Get a single stock record
pub async fn get_stock_record(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> AppResult<Json<StockPeriodResponse>> {
    let record = state.stock.get_record(record_id).await?;
    Ok(Json(record.into()))
}

/// Open a stock period for one product
pub async fn initialize_stock_period(
    State(state): State<AppState>,
    Json(input): Json<InitializePeriodInput>,
) -> AppResult<(StatusCode, Json<StockPeriodResponse>)> {
    let product_type = parse_product(&input.product_type)?;
    let period = parse_period(&input.period)?;
    let record = state
        .stock
        .initialize_period(&input.station_id, product_type, period)
        .await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Open a stock period for every product, skipping those already open
pub async fn initialize_all_stock_periods(
    State(state): State<AppState>,
    Json(input): Json<InitializeAllInput>,
) -> AppResult<Json<PeriodInitialization>> {
    let period = parse_period(&input.period)?;
    let result = state
        .stock
        .initialize_all_products(&input.station_id, period)
        .await?;
    Ok(Json(result))
}

/// Estimate closing stock from recorded sales
pub async fn estimate_closing_stock(
    State(state): State<AppState>,
    Query(query): Query<StockEstimateQuery>,
) -> AppResult<Json<StockEstimate>> {
    let product_type = parse_product(&query.product_type)?;
    let period = parse_period(&query.period)?;
    let estimate = state
        .stock
        .estimate_closing_stock(&query.station_id, product_type, period)
        .await;
    Ok(Json(estimate))
}

/// Record the measured closing stock of a period
pub async fn finalize_stock_period(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    Json(input): Json<FinalizePeriodInput>,
) -> AppResult<Json<StockPeriodResponse>> {
    let raw = match input.actual_closing_stock {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s,
        _ => {
            return Err(AppError::validation(
                "actual_closing_stock",
                "Closing stock must be a number",
            ))
        }
    };
    let record = state
        .stock
        .finalize_period_from_input(record_id, &raw)
        .await?;
    Ok(Json(record.into()))
}
