//! Weighted moving averages and short-term trend detection

use std::collections::BTreeMap;

use super::YieldAnalysis;
use crate::models::{GrowthTrend, Observation, Season};

impl YieldAnalysis {
    /// Season and recency weighted mean of the last `period` observations
    ///
    /// The observation at 1-based window position `i` gets weight
    /// `season_weight * i / period`. Returns `None` when fewer than `period`
    /// observations exist.
    pub fn seasonal_weighted_moving_average(&self, period: usize) -> Option<f64> {
        if period == 0 || self.len() < period {
            return None;
        }

        let window = self.store().recent(period);
        let weights: Vec<f64> = window
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let seasonal_weight = self.seasons().get(point.season()).weight;
                let recency_weight = (index + 1) as f64 / period as f64;
                seasonal_weight * recency_weight
            })
            .collect();
        let weight_sum: f64 = weights.iter().sum();

        // Normalized weights keep every partial sum within the window's range
        let average: f64 = window
            .iter()
            .zip(&weights)
            .map(|(point, weight)| point.value * (weight / weight_sum))
            .sum();

        Some(average)
    }

    /// Direction of the last `period` observations, compared within each season
    pub fn growth_trend(&self, period: usize) -> GrowthTrend {
        if period == 0 || self.len() < period {
            return GrowthTrend::Stable;
        }

        let mut by_season: BTreeMap<Season, Vec<f64>> = BTreeMap::new();
        for point in self.store().recent(period) {
            by_season.entry(point.season()).or_default().push(point.value);
        }

        let changes: Vec<f64> = by_season
            .values()
            .filter(|values| values.len() > 1)
            .filter_map(|values| {
                let first = values[0];
                let last = values[values.len() - 1];
                // A zero baseline has no defined fractional change
                (first != 0.0).then(|| (last - first) / first)
            })
            .collect();

        let average_change = if changes.is_empty() {
            0.0
        } else {
            changes.iter().sum::<f64>() / changes.len() as f64
        };

        GrowthTrend::from_change(average_change)
    }
}

/// Least-squares slope of value against index, as a fraction of the mean value
///
/// Returns `0.0` for fewer than two points, a zero mean, or any non-finite result.
pub fn trend(points: &[Observation]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (x, point) in points.iter().enumerate() {
        let x = x as f64;
        sum_x += x;
        sum_y += point.value;
        sum_xy += x * point.value;
        sum_xx += x * x;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let mean_y = sum_y / n;
    if mean_y == 0.0 {
        return 0.0;
    }

    let normalized = slope / mean_y;
    if normalized.is_finite() {
        normalized
    } else {
        0.0
    }
}
