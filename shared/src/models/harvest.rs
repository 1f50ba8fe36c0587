//! Harvest observation models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ForecastError;
use crate::models::Season;

/// A dated yield observation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    pub fn season(&self) -> Season {
        Season::of(&self.timestamp)
    }
}

/// A harvest record as exported by the farm dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestRecord {
    pub plot_id: Uuid,
    pub harvest_date: NaiveDate,
    pub cherry_weight_kg: Decimal,
}

impl HarvestRecord {
    /// Convert to an observation at midnight UTC of the harvest date
    pub fn to_observation(&self) -> Result<Observation, ForecastError> {
        let value = self.cherry_weight_kg.to_f64().ok_or_else(|| {
            ForecastError::UnrepresentableValue(self.cherry_weight_kg.to_string())
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ForecastError::InvalidValue(value));
        }
        Ok(Observation {
            value,
            timestamp: self.harvest_date.and_time(chrono::NaiveTime::MIN).and_utc(),
        })
    }
}
