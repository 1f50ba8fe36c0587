//! Business logic services for the Yield Forecast Server

pub mod forecast;
pub mod import;

pub use forecast::ForecastService;
