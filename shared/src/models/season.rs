//! Tropical season models
//!
//! Seasons are a fixed calendar heuristic for Thai coffee-growing regions:
//! they depend on the month only, never on observed data.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Tropical climate season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Season {
    /// November to February
    WetSeason,
    /// June to September
    DrySeason,
    /// March to May, and October
    Transitional,
}

impl Season {
    /// All seasons in reporting order
    pub const ALL: [Season; 3] = [Season::WetSeason, Season::DrySeason, Season::Transitional];

    /// Classify a calendar date into its season
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self::from_month0(date.month0())
    }

    /// Classify a zero-based month index (0 = January)
    pub fn from_month0(month0: u32) -> Self {
        match month0 {
            0 | 1 => Season::WetSeason,
            5..=8 => Season::DrySeason,
            m if m >= 10 => Season::WetSeason,
            _ => Season::Transitional,
        }
    }

    /// Wire name as used by the dashboard
    pub fn key(&self) -> &'static str {
        match self {
            Season::WetSeason => "wetSeason",
            Season::DrySeason => "drySeason",
            Season::Transitional => "transitional",
        }
    }

    /// Thai display name
    pub fn name_th(&self) -> &'static str {
        match self {
            Season::WetSeason => "ฤดูฝน",
            Season::DrySeason => "ฤดูแล้ง",
            Season::Transitional => "ช่วงเปลี่ยนฤดู",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::WetSeason => write!(f, "Wet Season"),
            Season::DrySeason => write!(f, "Dry Season"),
            Season::Transitional => write!(f, "Transitional"),
        }
    }
}

/// Inclusive plausibility band for simulated values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OptimalBand {
    pub min: f64,
    pub max: f64,
}

impl OptimalBand {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the band
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check whether a value sits exactly on either edge
    pub fn is_on_edge(&self, value: f64) -> bool {
        value == self.min || value == self.max
    }
}

/// Weight and optimal band for one season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeasonProfile {
    /// Multiplier for recency weighting and growth-rate scaling
    pub weight: f64,
    /// Band used to clamp forecast values
    pub optimal: OptimalBand,
}

impl SeasonProfile {
    pub fn new(weight: f64, min: f64, max: f64) -> Self {
        Self {
            weight,
            optimal: OptimalBand::new(min, max),
        }
    }
}

/// Per-season profiles for a crop and climate
///
/// The default is the tropical coffee profile. Other crops or climates can
/// supply their own table through configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeasonTable {
    pub wet_season: SeasonProfile,
    pub dry_season: SeasonProfile,
    pub transitional: SeasonProfile,
}

impl Default for SeasonTable {
    fn default() -> Self {
        Self {
            wet_season: SeasonProfile::new(1.2, 90.0, 120.0),
            dry_season: SeasonProfile::new(0.8, 70.0, 90.0),
            transitional: SeasonProfile::new(1.0, 80.0, 100.0),
        }
    }
}

impl SeasonTable {
    /// Profile for a season
    pub fn get(&self, season: Season) -> &SeasonProfile {
        match season {
            Season::WetSeason => &self.wet_season,
            Season::DrySeason => &self.dry_season,
            Season::Transitional => &self.transitional,
        }
    }

    /// Classify a date and return its season together with the profile
    pub fn profile_for<D: Datelike>(&self, date: &D) -> (Season, &SeasonProfile) {
        let season = Season::of(date);
        (season, self.get(season))
    }

    /// Reject tables that would produce non-finite or inverted forecasts
    pub fn validate(&self) -> Result<(), ForecastError> {
        for season in Season::ALL {
            let profile = self.get(season);
            if !profile.weight.is_finite() || profile.weight <= 0.0 {
                return Err(ForecastError::InvalidSeasonTable {
                    season,
                    reason: format!("weight must be a positive number, got {}", profile.weight),
                });
            }
            let band = profile.optimal;
            if !band.min.is_finite() || !band.max.is_finite() || band.min > band.max {
                return Err(ForecastError::InvalidSeasonTable {
                    season,
                    reason: format!("optimal band {}..{} is not a valid range", band.min, band.max),
                });
            }
        }
        Ok(())
    }
}
