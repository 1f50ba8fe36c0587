//! Day-by-day yield forecast simulation

use chrono::{Days, NaiveDate, Utc};

use super::{RandomSource, YieldAnalysis, DEFAULT_WINDOW_PERIOD};
use crate::models::ForecastPoint;

/// Starting value when there is not enough history for a weighted average
pub const DEFAULT_SEED_VALUE: f64 = 100.0;

/// Daily jitter is drawn from `[-JITTER_AMPLITUDE, JITTER_AMPLITUDE)`
pub const JITTER_AMPLITUDE: f64 = 0.01;

/// Synthesizes a forecast curve from an analysis
///
/// The value compounds day over day at the season-scaled base growth rate,
/// perturbed by ±1% jitter, and is clamped to that day's season band. Because
/// the clamp applies every day, the curve often rests on a band edge instead
/// of moving smoothly. That is the intended plausibility bound.
#[derive(Debug, Clone)]
pub struct ForecastSimulator<R> {
    random: R,
}

impl<R: RandomSource> ForecastSimulator<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }

    /// Simulate `days_ahead` days starting today (UTC)
    pub fn simulate(&mut self, analysis: &YieldAnalysis, days_ahead: usize) -> Vec<ForecastPoint> {
        self.simulate_from(analysis, Utc::now().date_naive(), days_ahead)
    }

    /// Simulate `days_ahead` days with day 1 on `start`
    pub fn simulate_from(
        &mut self,
        analysis: &YieldAnalysis,
        start: NaiveDate,
        days_ahead: usize,
    ) -> Vec<ForecastPoint> {
        let mut current_value = analysis
            .seasonal_weighted_moving_average(DEFAULT_WINDOW_PERIOD)
            .unwrap_or(DEFAULT_SEED_VALUE);
        let base_growth_rate = analysis.base_growth_rate();

        let mut forecast = Vec::with_capacity(days_ahead);
        for offset in 0..days_ahead {
            let Some(date) = start.checked_add_days(Days::new(offset as u64)) else {
                break;
            };
            let (season, profile) = analysis.seasons().profile_for(&date);

            let growth_rate = base_growth_rate * profile.weight;
            let jitter = 1.0 + self.random.uniform(-JITTER_AMPLITUDE, JITTER_AMPLITUDE);

            current_value *= (1.0 + growth_rate) * jitter;
            current_value = profile.optimal.clamp(current_value);

            forecast.push(ForecastPoint {
                day: (offset + 1) as u32,
                date,
                season,
                predicted_value: current_value,
                optimal: profile.optimal,
                growth_rate,
            });
        }

        forecast
    }

    pub fn into_inner(self) -> R {
        self.random
    }
}

impl YieldAnalysis {
    /// Non-deterministic forecast starting today
    pub fn simulate(&self, days_ahead: usize) -> Vec<ForecastPoint> {
        ForecastSimulator::new(super::ThreadRandom).simulate(self, days_ahead)
    }

    /// Forecast from a given start date with an injected random source
    pub fn simulate_with<R: RandomSource>(
        &self,
        start: NaiveDate,
        days_ahead: usize,
        random: R,
    ) -> Vec<ForecastPoint> {
        ForecastSimulator::new(random).simulate_from(self, start, days_ahead)
    }
}
