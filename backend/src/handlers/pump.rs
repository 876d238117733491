//! HTTP handlers for pump registry endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::pump::{CreatePumpInput, PumpService};
use crate::AppState;
use shared::models::Pump;

#[derive(Debug, Deserialize)]
pub struct StationQuery {
    pub station_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SetActiveInput {
    pub is_active: bool,
}

/// Register a pump
pub async fn create_pump(
    State(state): State<AppState>,
    Json(input): Json<CreatePumpInput>,
) -> AppResult<(StatusCode, Json<Pump>)> {
    let service = PumpService::new(state.db);
    let pump = service.create_pump(input).await?;
    Ok((StatusCode::CREATED, Json(pump)))
}

/// List pumps of a station
pub async fn list_pumps(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
) -> AppResult<Json<Vec<Pump>>> {
    let service = PumpService::new(state.db);
    let pumps = service.list_pumps(&query.station_id).await?;
    Ok(Json(pumps))
}

/// Take a pump in or out of service
pub async fn set_pump_active(
    State(state): State<AppState>,
    Path(pump_id): Path<Uuid>,
    Json(input): Json<SetActiveInput>,
) -> AppResult<Json<Pump>> {
    let service = PumpService::new(state.db);
    let pump = service.set_active(pump_id, input.is_active).await?;
    Ok(Json(pump))
}
