//! HTTP handlers for product price endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use super::StationQuery;
use crate::error::AppResult;
use crate::services::price::{PriceService, SetPriceInput};
use crate::AppState;
use shared::models::ProductPrice;

/// List prices of a station
pub async fn list_prices(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
) -> AppResult<Json<Vec<ProductPrice>>> {
    let service = PriceService::new(state.db);
    let prices = service.list_prices(&query.station_id).await?;
    Ok(Json(prices))
}

/// Set the price of a product
pub async fn set_price(
    State(state): State<AppState>,
    Json(input): Json<SetPriceInput>,
) -> AppResult<Json<ProductPrice>> {
    let service = PriceService::new(state.db);
    let price = service.set_price(input).await?;
    Ok(Json(price))
}
