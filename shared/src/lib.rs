//! Shared types and the seasonal yield forecasting engine
//!
//! This crate is used by the backend server and, via WASM, by the farm
//! dashboard in the browser. It performs no I/O.

pub mod error;
pub mod forecasting;
pub mod models;
pub mod validation;

pub use error::ForecastError;
pub use forecasting::*;
pub use models::*;
pub use validation::*;
