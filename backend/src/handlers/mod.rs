//! HTTP handlers for the Yield Forecast Server

pub mod forecast;
pub mod health;
pub mod season;

pub use forecast::{analyze, forecast_plots, import_csv, seasonal_stats, simulate};
pub use health::health_check;
pub use season::{classify_date, get_season_table};
