//! Seasonal yield statistics and point predictions

use chrono::{NaiveDate, Utc};

use super::{trend, YieldAnalysis, DEFAULT_WINDOW_PERIOD};
use crate::models::SeasonalYieldStats;

impl YieldAnalysis {
    /// Total, count, min, max and average yield per season
    ///
    /// Seasons without observations report all zeros.
    pub fn seasonal_yield_stats(&self) -> SeasonalYieldStats {
        let mut stats = SeasonalYieldStats::default();

        for point in self.store().observations() {
            let entry = stats.get_mut(point.season());
            if entry.count == 0 {
                entry.min = point.value;
                entry.max = point.value;
            } else {
                entry.min = entry.min.min(point.value);
                entry.max = entry.max.max(point.value);
            }
            entry.total += point.value;
            entry.count += 1;
            // Running mean stays finite even when the total overflows
            entry.average += (point.value - entry.average) / entry.count as f64;
        }

        stats
    }

    /// Simple moving average of the last 7 values adjusted by their trend
    ///
    /// Floored at zero. `None` with fewer than two observations.
    pub fn predict_next_value(&self) -> Option<f64> {
        if self.len() < 2 {
            return None;
        }

        let recent = self.store().recent(DEFAULT_WINDOW_PERIOD);
        let values: Vec<f64> = recent.iter().map(|p| p.value).collect();
        let sma = mean(&values);
        let trend = trend(recent);

        Some((sma * (1.0 + trend)).clamp(0.0, f64::MAX))
    }

    /// Season-aware prediction for the season containing today (UTC)
    pub fn predict_next_seasonal_value(&self) -> Option<f64> {
        self.predict_next_seasonal_value_on(Utc::now().date_naive())
    }

    /// Average of the observations in `today`'s season, scaled by its weight
    ///
    /// Falls back to [`predict_next_value`](Self::predict_next_value) when the
    /// season has no observations. `None` with fewer than two observations.
    pub fn predict_next_seasonal_value_on(&self, today: NaiveDate) -> Option<f64> {
        if self.len() < 2 {
            return None;
        }

        let (season, profile) = self.seasons().profile_for(&today);
        let seasonal: Vec<f64> = self
            .store()
            .observations()
            .iter()
            .filter(|p| p.season() == season)
            .map(|p| p.value)
            .collect();

        if seasonal.is_empty() {
            return self.predict_next_value();
        }

        Some((mean(&seasonal) * profile.weight).clamp(0.0, f64::MAX))
    }
}

/// Arithmetic mean, dividing before summing so large values cannot overflow
fn mean(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    values.iter().map(|value| value / n).sum()
}
