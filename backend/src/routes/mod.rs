//! Route definitions for the Fuel Station Dashboard

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/stock", stock_routes())
        .nest("/fuel-records", fuel_record_routes())
        .nest("/pumps", pump_routes())
        .nest("/prices", price_routes())
        .nest("/expenses", expense_routes())
        .nest("/summary", summary_routes())
}

/// Monthly stock reconciliation routes
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stock_period))
        .route("/initialize", post(handlers::initialize_stock_period))
        .route("/initialize-all", post(handlers::initialize_all_stock_periods))
        .route("/estimate", get(handlers::estimate_closing_stock))
        .route("/:record_id", get(handlers::get_stock_record))
        .route("/:record_id/finalize", put(handlers::finalize_stock_period))
}

/// Pump reading routes
fn fuel_record_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_readings).post(handlers::record_reading),
        )
        .route("/:record_id", put(handlers::update_reading))
}

/// Pump registry routes
fn pump_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_pumps).post(handlers::create_pump))
        .route("/:pump_id/active", put(handlers::set_pump_active))
}

/// Product price routes
fn price_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::list_prices).put(handlers::set_price))
}

/// Expense routes
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/:expense_id", put(handlers::update_expense))
}

/// Summary routes
fn summary_routes() -> Router<AppState> {
    Router::new().route("/daily", get(handlers::get_daily_summary))
}
