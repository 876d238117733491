//! Station expense entry

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::{Expense, ExpenseCategory};
use shared::types::DateRange;
use shared::validation::{validate_description, validate_expense_amount, validate_station_id};

/// Expense service
#[derive(Clone)]
pub struct ExpenseService {
    db: PgPool,
}

/// Input for recording an expense
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseInput {
    #[validate(length(min = 1, max = 64, message = "Station ID is required"))]
    pub station_id: String,
    /// Defaults to today
    pub expense_date: Option<NaiveDate>,
    pub category: ExpenseCategory,
    /// Stored trimmed; must not be blank
    pub description: String,
    pub amount: Decimal,
}

/// Input for correcting an expense
#[derive(Debug, Deserialize)]
pub struct UpdateExpenseInput {
    pub expense_date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
}

impl ExpenseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record an expense
    pub async fn create_expense(&self, input: CreateExpenseInput) -> AppResult<Expense> {
        input.validate()?;
        validate_station_id(&input.station_id)
            .map_err(|m| AppError::validation("station_id", m))?;
        validate_description(&input.description)
            .map_err(|m| AppError::validation("description", m))?;
        validate_expense_amount(input.amount).map_err(|m| AppError::validation("amount", m))?;

        let expense_date = input.expense_date.unwrap_or_else(|| Utc::now().date_naive());

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (station_id, expense_date, category, description, amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, station_id, expense_date, category, description, amount,
                      created_at, updated_at
            "#,
        )
        .bind(&input.station_id)
        .bind(expense_date)
        .bind(input.category)
        .bind(input.description.trim())
        .bind(input.amount)
        .fetch_one(&self.db)
        .await?;

        Ok(expense)
    }

    /// Update an expense
    pub async fn update_expense(
        &self,
        expense_id: Uuid,
        input: UpdateExpenseInput,
    ) -> AppResult<Expense> {
        if let Some(description) = &input.description {
            validate_description(description)
                .map_err(|m| AppError::validation("description", m))?;
        }

        let existing = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, station_id, expense_date, category, description, amount,
                   created_at, updated_at
            FROM expenses WHERE id = $1
            "#,
        )
        .bind(expense_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Expense".to_string()))?;

        let amount = input.amount.unwrap_or(existing.amount);
        validate_expense_amount(amount).map_err(|m| AppError::validation("amount", m))?;

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET expense_date = $1, category = $2, description = $3, amount = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING id, station_id, expense_date, category, description, amount,
                      created_at, updated_at
            "#,
        )
        .bind(input.expense_date.unwrap_or(existing.expense_date))
        .bind(input.category.unwrap_or(existing.category))
        .bind(
            input
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or(existing.description.as_str()),
        )
        .bind(amount)
        .bind(expense_id)
        .fetch_one(&self.db)
        .await?;

        Ok(expense)
    }

    /// Expenses of a station within a date range, newest first
    pub async fn list_expenses(&self, station_id: &str, range: DateRange) -> AppResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, station_id, expense_date, category, description, amount,
                   created_at, updated_at
            FROM expenses
            WHERE station_id = $1 AND expense_date BETWEEN $2 AND $3
            ORDER BY expense_date DESC, created_at DESC
            "#,
        )
        .bind(station_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        Ok(expenses)
    }
}
