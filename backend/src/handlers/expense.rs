//! HTTP handlers for expense endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::expense::{CreateExpenseInput, ExpenseService, UpdateExpenseInput};
use crate::AppState;
use shared::models::Expense;
use shared::types::DateRange;

#[derive(Debug, Deserialize)]
pub struct ExpensesQuery {
    pub station_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Record an expense
pub async fn create_expense(
    State(state): State<AppState>,
    Json(input): Json<CreateExpenseInput>,
) -> AppResult<(StatusCode, Json<Expense>)> {
    let service = ExpenseService::new(state.db);
    let expense = service.create_expense(input).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// Update an expense
pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
    Json(input): Json<UpdateExpenseInput>,
) -> AppResult<Json<Expense>> {
    let service = ExpenseService::new(state.db);
    let expense = service.update_expense(expense_id, input).await?;
    Ok(Json(expense))
}

/// List expenses of a station within a date range
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpensesQuery>,
) -> AppResult<Json<Vec<Expense>>> {
    let range = DateRange::new(query.start, query.end)
        .ok_or_else(|| AppError::validation("start", "Start date must not be after end date"))?;
    let service = ExpenseService::new(state.db);
    let expenses = service.list_expenses(&query.station_id, range).await?;
    Ok(Json(expenses))
}
