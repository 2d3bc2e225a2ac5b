//! Domain building blocks shared by the store and the HTTP API: record
//! types, the error taxonomy, field validation, the clock and the
//! progress calculator.

pub mod error;
pub mod progress;
pub mod project;
pub mod time;
pub mod types;
