//! Fuel product codes

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::ParseError;

/// Fuel grade sold at a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "product_type", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    /// Premium motor spirit (petrol)
    Pms,
    /// Automotive gas oil (diesel)
    Ago,
    /// Dual purpose kerosene
    Dpk,
}

impl ProductType {
    /// Every product a station stocks, in display order
    pub const ALL: [ProductType; 3] = [ProductType::Pms, ProductType::Ago, ProductType::Dpk];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Pms => "PMS",
            ProductType::Ago => "AGO",
            ProductType::Dpk => "DPK",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PMS" => Ok(ProductType::Pms),
            "AGO" => Ok(ProductType::Ago),
            "DPK" => Ok(ProductType::Dpk),
            _ => Err(ParseError::UnknownProduct(s.to_string())),
        }
    }
}
