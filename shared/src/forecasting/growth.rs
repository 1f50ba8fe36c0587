//! Bounded daily growth rate from per-season history

use std::collections::BTreeMap;

use super::YieldAnalysis;
use crate::models::{Observation, Season};

/// Growth rate assumed when history cannot support an estimate
pub const DEFAULT_GROWTH_RATE: f64 = 0.001;

/// Ceiling on the magnitude of the daily growth rate (±5% per day)
pub const MAX_DAILY_GROWTH_RATE: f64 = 0.05;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

impl YieldAnalysis {
    /// Daily compound growth rate averaged over seasons, clamped to ±5%
    ///
    /// Each season with at least two observations, a positive first value and
    /// a non-zero time span contributes `(last / first)^(1 / days) - 1`.
    /// Returns [`DEFAULT_GROWTH_RATE`] when no season contributes.
    pub fn base_growth_rate(&self) -> f64 {
        if self.len() < 2 {
            return DEFAULT_GROWTH_RATE;
        }

        let mut by_season: BTreeMap<Season, Vec<&Observation>> = BTreeMap::new();
        for point in self.store().observations() {
            by_season.entry(point.season()).or_default().push(point);
        }

        let rates: Vec<f64> = by_season
            .values()
            .filter_map(|points| compound_daily_rate(points))
            .collect();

        if rates.is_empty() {
            return DEFAULT_GROWTH_RATE;
        }

        let average = rates.iter().sum::<f64>() / rates.len() as f64;
        average.clamp(-MAX_DAILY_GROWTH_RATE, MAX_DAILY_GROWTH_RATE)
    }
}

/// Compound daily rate between the first and last of chronologically sorted points
fn compound_daily_rate(points: &[&Observation]) -> Option<f64> {
    let (first, last) = match points {
        [first, .., last] => (first, last),
        _ => return None,
    };

    let elapsed_days =
        (last.timestamp - first.timestamp).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if elapsed_days <= 0.0 || first.value <= 0.0 {
        return None;
    }

    // An overflowing ratio stays infinite and is clamped by the caller
    let rate = (last.value / first.value).powf(1.0 / elapsed_days) - 1.0;
    (!rate.is_nan()).then_some(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(points: &[(f64, &str)]) -> YieldAnalysis {
        let mut analysis = YieldAnalysis::new();
        for (value, ts) in points {
            analysis.add_data_point(*value, ts).unwrap();
        }
        analysis
    }

    #[test]
    fn test_default_rate_for_short_history() {
        assert_eq!(YieldAnalysis::new().base_growth_rate(), DEFAULT_GROWTH_RATE);
        assert_eq!(
            analysis(&[(100.0, "2024-01-01")]).base_growth_rate(),
            DEFAULT_GROWTH_RATE
        );
    }

    #[test]
    fn test_default_rate_when_no_season_has_two_points() {
        let a = analysis(&[(100.0, "2024-01-01"), (90.0, "2024-06-01"), (95.0, "2024-04-01")]);
        assert_eq!(a.base_growth_rate(), DEFAULT_GROWTH_RATE);
    }

    #[test]
    fn test_default_rate_when_points_share_a_timestamp() {
        let a = analysis(&[(100.0, "2024-01-01"), (150.0, "2024-01-01")]);
        assert_eq!(a.base_growth_rate(), DEFAULT_GROWTH_RATE);
    }

    #[test]
    fn test_single_season_compound_rate() {
        // 100 -> 121 over 2 days is 10% per day, clamped to 5%
        let a = analysis(&[(100.0, "2024-04-01"), (121.0, "2024-04-03")]);
        assert_eq!(a.base_growth_rate(), MAX_DAILY_GROWTH_RATE);

        // 100 -> 102.01 over 2 days is 1% per day
        let a = analysis(&[(100.0, "2024-04-01"), (102.01, "2024-04-03")]);
        assert!((a.base_growth_rate() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_rates_are_averaged_across_seasons() {
        let a = analysis(&[
            (100.0, "2024-04-01"),
            (102.01, "2024-04-03"),
            (100.0, "2024-07-01"),
            (100.0, "2024-07-11"),
        ]);
        assert!((a.base_growth_rate() - 0.005).abs() < 1e-9);
    }

    #[test]
    fn test_uses_first_and_last_point_of_each_season() {
        let a = analysis(&[
            (100.0, "2024-04-01"),
            (500.0, "2024-04-02"),
            (100.0, "2024-04-11"),
        ]);
        assert!(a.base_growth_rate().abs() < 1e-12);
    }

    #[test]
    fn test_zero_first_value_contributes_nothing() {
        let a = analysis(&[(0.0, "2024-04-01"), (50.0, "2024-04-10")]);
        assert_eq!(a.base_growth_rate(), DEFAULT_GROWTH_RATE);

        let a = analysis(&[
            (0.0, "2024-04-01"),
            (50.0, "2024-04-10"),
            (100.0, "2024-07-01"),
            (102.01, "2024-07-03"),
        ]);
        assert!((a.base_growth_rate() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_overflowing_ratio_is_clamped() {
        // 100 / 1e-320 overflows; the season still contributes the ceiling
        let a = analysis(&[(1e-320, "2024-04-01"), (100.0, "2024-04-03")]);
        assert_eq!(a.base_growth_rate(), MAX_DAILY_GROWTH_RATE);
    }

    #[test]
    fn test_collapse_to_zero_is_clamped() {
        let a = analysis(&[(100.0, "2024-04-01"), (0.0, "2024-04-02")]);
        assert_eq!(a.base_growth_rate(), -MAX_DAILY_GROWTH_RATE);
    }
}
