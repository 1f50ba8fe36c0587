//! Seasonal yield forecasting engine
//!
//! A pure, in-memory computation over caller-supplied harvest observations:
//! - seasonal and recency weighted moving averages
//! - short-term trend detection
//! - a bounded daily growth rate from per-season history
//! - a day-by-day forecast clamped to each season's optimal band
//! - seasonal yield statistics and next-value predictions
//!
//! One [`YieldAnalysis`] is built per analysis session and dropped afterwards.
//! It is not meant to be shared between concurrent callers.

mod growth;
mod random;
mod simulator;
mod stats;
mod store;
mod trend;

pub use growth::{DEFAULT_GROWTH_RATE, MAX_DAILY_GROWTH_RATE};
pub use random::{NoJitter, RandomSource, SeededRandom, ThreadRandom};
pub use simulator::{ForecastSimulator, DEFAULT_SEED_VALUE, JITTER_AMPLITUDE};
pub use store::ObservationStore;
pub use trend::trend;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ForecastError;
use crate::models::{AnalysisReport, ForecastSummary, Observation, SeasonTable};

/// Default moving-average window, in observations
pub const DEFAULT_WINDOW_PERIOD: usize = 7;

/// Default forecast horizon, in days
pub const DEFAULT_FORECAST_DAYS: usize = 90;

/// Observation history paired with the season table it is analysed under
#[derive(Debug, Clone, Default)]
pub struct YieldAnalysis {
    store: ObservationStore,
    seasons: SeasonTable,
}

impl YieldAnalysis {
    /// Empty analysis using the default tropical coffee season table
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty analysis using a caller-supplied season table
    pub fn with_seasons(seasons: SeasonTable) -> Result<Self, ForecastError> {
        seasons.validate()?;
        Ok(Self {
            store: ObservationStore::new(),
            seasons,
        })
    }

    /// Build an analysis from a batch of observations, validating each one
    pub fn from_observations<I>(seasons: SeasonTable, observations: I) -> Result<Self, ForecastError>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut analysis = Self::with_seasons(seasons)?;
        for observation in observations {
            analysis.add_observation(observation.value, observation.timestamp)?;
        }
        Ok(analysis)
    }

    pub fn add_data_point(&mut self, value: f64, timestamp: &str) -> Result<(), ForecastError> {
        self.store.add_data_point(value, timestamp)
    }

    pub fn add_observation(
        &mut self,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), ForecastError> {
        self.store.add_observation(value, timestamp)
    }

    pub fn store(&self) -> &ObservationStore {
        &self.store
    }

    pub fn seasons(&self) -> &SeasonTable {
        &self.seasons
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Run every estimator and the simulator for one dashboard payload
    pub fn report<R: RandomSource>(
        &self,
        start: NaiveDate,
        days_ahead: usize,
        period: usize,
        random: R,
    ) -> AnalysisReport {
        let forecast = ForecastSimulator::new(random).simulate_from(self, start, days_ahead);
        let summary = ForecastSummary::from_points(&forecast);

        AnalysisReport {
            observation_count: self.len(),
            weighted_average: self.seasonal_weighted_moving_average(period),
            growth_trend: self.growth_trend(period),
            base_growth_rate: self.base_growth_rate(),
            next_value: self.predict_next_value(),
            next_seasonal_value: self.predict_next_seasonal_value_on(start),
            seasonal_stats: self.seasonal_yield_stats(),
            forecast,
            summary,
        }
    }
}
