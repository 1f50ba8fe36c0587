//! Validation utilities for forecasting input
//!
//! Everything entering the engine passes through here, so invalid dates or
//! values never reach the sorted store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::ForecastError;

// ============================================================================
// Observation Validations
// ============================================================================

/// Validate an observed yield value (finite and non-negative)
pub fn validate_observation_value(value: f64) -> Result<f64, ForecastError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ForecastError::InvalidValue(value))
    }
}

/// Parse an observation timestamp
///
/// Accepts RFC 3339 (`2024-01-08T06:30:00+07:00`), naive date-times in UTC
/// (`2024-01-08T06:30:00`, `2024-01-08 06:30:00`) and bare dates
/// (`2024-01-08`, read as midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ForecastError> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    Err(ForecastError::InvalidTimestamp(raw.to_string()))
}

// ============================================================================
// Request Validations
// ============================================================================

/// Convert a requested forecast horizon, checking it against a configured ceiling
///
/// Non-positive horizons are not an error: they yield an empty forecast.
pub fn normalize_forecast_horizon(days_ahead: i64, max_days: u32) -> Result<usize, &'static str> {
    if days_ahead > i64::from(max_days) {
        return Err("Forecast horizon exceeds the configured maximum");
    }
    Ok(usize::try_from(days_ahead).unwrap_or(0))
}

/// Validate a moving-average window size
pub fn validate_window_period(period: usize) -> Result<(), &'static str> {
    if period == 0 {
        return Err("Window period must be at least 1");
    }
    if period > 365 {
        return Err("Window period must be at most 365 observations");
    }
    Ok(())
}
