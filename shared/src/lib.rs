//! Shared types and models for the Fuel Station Dashboard
//!
//! This crate contains types shared between the backend, frontend (via WASM),
//! and other components of the system.

pub mod calculations;
pub mod models;
pub mod types;
pub mod validation;

pub use calculations::*;
pub use models::*;
pub use types::*;
pub use validation::*;
