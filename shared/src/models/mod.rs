//! Domain models for seasonal yield forecasting

mod forecast;
mod harvest;
mod season;

pub use forecast::*;
pub use harvest::*;
pub use season::*;
