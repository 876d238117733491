//! Product selling prices per station

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::{ProductPrice, ProductType};
use shared::validation::{validate_price, validate_station_id};

/// Product price service
#[derive(Clone)]
pub struct PriceService {
    db: PgPool,
}

/// Input for setting a product price
#[derive(Debug, Deserialize, Validate)]
pub struct SetPriceInput {
    #[validate(length(min = 1, max = 64, message = "Station ID is required"))]
    pub station_id: String,
    pub product_type: ProductType,
    pub price: Decimal,
}

impl PriceService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create or replace the price of a product at a station
    pub async fn set_price(&self, input: SetPriceInput) -> AppResult<ProductPrice> {
        input.validate()?;
        validate_station_id(&input.station_id)
            .map_err(|m| AppError::validation("station_id", m))?;
        validate_price(input.price).map_err(|m| AppError::validation("price", m))?;

        let price = sqlx::query_as::<_, ProductPrice>(
            r#"
            INSERT INTO product_prices (station_id, product_type, price)
            VALUES ($1, $2, $3)
            ON CONFLICT (station_id, product_type)
            DO UPDATE SET price = EXCLUDED.price, updated_at = NOW()
            RETURNING id, station_id, product_type, price, updated_at
            "#,
        )
        .bind(&input.station_id)
        .bind(input.product_type)
        .bind(input.price)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            station_id = %price.station_id,
            product = %price.product_type,
            price = %price.price,
            "Product price updated"
        );

        Ok(price)
    }

    /// Prices of a station ordered by product
    pub async fn list_prices(&self, station_id: &str) -> AppResult<Vec<ProductPrice>> {
        let prices = sqlx::query_as::<_, ProductPrice>(
            r#"
            SELECT id, station_id, product_type, price, updated_at
            FROM product_prices
            WHERE station_id = $1
            ORDER BY product_type
            "#,
        )
        .bind(station_id)
        .fetch_all(&self.db)
        .await?;

        Ok(prices)
    }

    pub async fn get_price(
        &self,
        station_id: &str,
        product_type: ProductType,
    ) -> AppResult<ProductPrice> {
        sqlx::query_as::<_, ProductPrice>(
            r#"
            SELECT id, station_id, product_type, price, updated_at
            FROM product_prices
            WHERE station_id = $1 AND product_type = $2
            "#,
        )
        .bind(station_id)
        .bind(product_type)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} price", product_type)))
    }
}
