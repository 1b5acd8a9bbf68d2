pub mod coerce;
pub mod core;
pub mod error;
