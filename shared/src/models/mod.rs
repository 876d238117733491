//! Domain models for the Fuel Station Dashboard

mod expense;
mod fuel;
mod period;
mod product;
mod stock;
mod summary;

pub use expense::*;
pub use fuel::*;
pub use period::*;
pub use product::*;
pub use stock::*;
pub use summary::*;
