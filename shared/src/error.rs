//! Errors raised at the forecasting engine boundary
//!
//! Inside the engine, insufficient data degrades to sentinel values. These
//! errors only cover input that must not enter the engine at all.

use thiserror::Error;

use crate::models::Season;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Invalid observation value: {0} (must be a finite, non-negative number)")]
    InvalidValue(f64),

    #[error("Invalid observation value: {0} cannot be represented as a number")]
    UnrepresentableValue(String),

    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("Invalid season table for {season}: {reason}")]
    InvalidSeasonTable { season: Season, reason: String },
}

impl ForecastError {
    /// Field the error refers to, for API error payloads
    pub fn field(&self) -> &'static str {
        match self {
            ForecastError::InvalidValue(_) | ForecastError::UnrepresentableValue(_) => "value",
            ForecastError::InvalidTimestamp(_) => "timestamp",
            ForecastError::InvalidSeasonTable { .. } => "seasons",
        }
    }

    /// Thai message for dashboard users
    pub fn message_th(&self) -> String {
        match self {
            ForecastError::InvalidValue(value) => {
                format!("ค่าผลผลิตไม่ถูกต้อง: {} (ต้องเป็นตัวเลขที่ไม่ติดลบ)", value)
            }
            ForecastError::UnrepresentableValue(raw) => {
                format!("ค่าผลผลิตไม่ถูกต้อง: {} (แปลงเป็นตัวเลขไม่ได้)", raw)
            }
            ForecastError::InvalidTimestamp(raw) => format!("รูปแบบวันที่ไม่ถูกต้อง: {}", raw),
            ForecastError::InvalidSeasonTable { season, reason } => {
                format!("การตั้งค่า{}ไม่ถูกต้อง: {}", season.name_th(), reason)
            }
        }
    }
}
