//! Business logic services for the Fuel Station Dashboard

pub mod expense;
pub mod fuel_record;
pub mod notification;
pub mod price;
pub mod pump;
pub mod stock;
pub mod summary;

pub use expense::ExpenseService;
pub use fuel_record::FuelRecordService;
pub use notification::{NotificationKind, NotificationSink, RecordingNotifier, TracingNotifier};
pub use price::PriceService;
pub use pump::PumpService;
pub use stock::StockService;
pub use summary::SummaryService;
