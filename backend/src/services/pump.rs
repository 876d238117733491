//! Pump registry per station

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::{ProductType, Pump};
use shared::validation::validate_station_id;

/// Pump service
#[derive(Clone)]
pub struct PumpService {
    db: PgPool,
}

/// Input for registering a pump
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePumpInput {
    #[validate(length(min = 1, max = 64, message = "Station ID is required"))]
    pub station_id: String,
    #[validate(length(min = 1, max = 50, message = "Pump name must be 1-50 characters"))]
    pub name: String,
    pub product_type: ProductType,
}

impl PumpService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a pump; names are unique within a station
    pub async fn create_pump(&self, input: CreatePumpInput) -> AppResult<Pump> {
        input.validate()?;
        validate_station_id(&input.station_id)
            .map_err(|m| AppError::validation("station_id", m))?;
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name", "Pump name is required"));
        }

        let pump = sqlx::query_as::<_, Pump>(
            r#"
            INSERT INTO pumps (station_id, name, product_type)
            VALUES ($1, $2, $3)
            RETURNING id, station_id, name, product_type, is_active, created_at
            "#,
        )
        .bind(&input.station_id)
        .bind(name)
        .bind(input.product_type)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            AppError::from_insert(e, "pumps", format!("Pump \"{}\" already exists", name))
        })?;

        Ok(pump)
    }

    /// Pumps of a station, active first, then by name
    pub async fn list_pumps(&self, station_id: &str) -> AppResult<Vec<Pump>> {
        let pumps = sqlx::query_as::<_, Pump>(
            r#"
            SELECT id, station_id, name, product_type, is_active, created_at
            FROM pumps
            WHERE station_id = $1
            ORDER BY is_active DESC, name
            "#,
        )
        .bind(station_id)
        .fetch_all(&self.db)
        .await?;

        Ok(pumps)
    }

    /// Take a pump in or out of service
    pub async fn set_active(&self, pump_id: Uuid, is_active: bool) -> AppResult<Pump> {
        sqlx::query_as::<_, Pump>(
            r#"
            UPDATE pumps SET is_active = $1
            WHERE id = $2
            RETURNING id, station_id, name, product_type, is_active, created_at
            "#,
        )
        .bind(is_active)
        .bind(pump_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Pump".to_string()))
    }
}
