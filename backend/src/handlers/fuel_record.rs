//! HTTP handlers for pump reading endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::fuel_record::{FuelRecordService, RecordReadingInput, UpdateReadingInput};
use crate::AppState;
use shared::models::FuelRecord;

#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    pub station_id: String,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

/// Record a pump reading
pub async fn record_reading(
    State(state): State<AppState>,
    Json(input): Json<RecordReadingInput>,
) -> AppResult<(StatusCode, Json<FuelRecord>)> {
    let service = FuelRecordService::new(state.db);
    let record = service.record_reading(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Correct a pump reading
pub async fn update_reading(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    Json(input): Json<UpdateReadingInput>,
) -> AppResult<Json<FuelRecord>> {
    let service = FuelRecordService::new(state.db);
    let record = service.update_reading(record_id, input).await?;
    Ok(Json(record))
}

/// List pump readings for a day
pub async fn list_readings(
    State(state): State<AppState>,
    Query(query): Query<ReadingsQuery>,
) -> AppResult<Json<Vec<FuelRecord>>> {
    let service = FuelRecordService::new(state.db);
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let records = service.list_readings(&query.station_id, date).await?;
    Ok(Json(records))
}
