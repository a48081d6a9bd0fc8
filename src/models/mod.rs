//! Record types persisted by the data access layer.

pub mod account;
pub mod form;
pub mod patient;
pub mod patient_data;
pub mod suggestion;

pub use account::*;
pub use patient::*;
pub use patient_data::*;
pub use suggestion::*;

/// Timestamp format used for every stored `NaiveDateTime`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
