//! Daily summary handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::services::summary::SummaryService;
use crate::AppState;
use shared::models::DailySummary;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub station_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: Option<String>, // "json" or "csv"
}

/// Daily summaries with the currency their amounts are in
#[derive(Debug, Serialize)]
pub struct DailySummaryReport {
    pub currency: String,
    pub days: Vec<DailySummary>,
}

/// Get per-day sales and expenses
pub async fn get_daily_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<impl IntoResponse> {
    let service = SummaryService::new(state.db.clone(), state.config.dashboard.max_summary_days);
    let data = service
        .daily_summary(&query.station_id, query.start, query.end)
        .await?;

    if query.format.as_deref() == Some("csv") {
        let csv = SummaryService::export_to_csv(&data)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"daily_summary.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(DailySummaryReport {
            currency: state.config.dashboard.currency.clone(),
            days: data,
        })
        .into_response())
    }
}
