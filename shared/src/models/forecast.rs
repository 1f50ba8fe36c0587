//! Forecast output models
//!
//! Plain serializable records handed to the dashboard and report layers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{OptimalBand, Season};

/// One simulated day of a yield forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// 1-based day offset from the forecast start
    pub day: u32,
    pub date: NaiveDate,
    pub season: Season,
    pub predicted_value: f64,
    pub optimal: OptimalBand,
    /// Daily growth rate applied on this day (base rate times season weight)
    pub growth_rate: f64,
}

/// Row shape for CSV export of a forecast curve
#[derive(Debug, Clone, Serialize)]
pub struct ForecastCsvRow {
    pub day: u32,
    pub date: NaiveDate,
    pub season: &'static str,
    pub predicted_value: f64,
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub growth_rate: f64,
}

impl From<&ForecastPoint> for ForecastCsvRow {
    fn from(point: &ForecastPoint) -> Self {
        Self {
            day: point.day,
            date: point.date,
            season: point.season.key(),
            predicted_value: point.predicted_value,
            optimal_min: point.optimal.min,
            optimal_max: point.optimal.max,
            growth_rate: point.growth_rate,
        }
    }
}

/// Short-term direction of recent yields
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrowthTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl GrowthTrend {
    /// Classify an average fractional change (±5% dead band)
    pub fn from_change(change: f64) -> Self {
        if change > 0.05 {
            GrowthTrend::Increasing
        } else if change < -0.05 {
            GrowthTrend::Decreasing
        } else {
            GrowthTrend::Stable
        }
    }
}

impl std::fmt::Display for GrowthTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthTrend::Increasing => write!(f, "increasing"),
            GrowthTrend::Decreasing => write!(f, "decreasing"),
            GrowthTrend::Stable => write!(f, "stable"),
        }
    }
}

/// Aggregate yield figures for one season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct YieldStats {
    pub total: f64,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Yield aggregates for every season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalYieldStats {
    pub wet_season: YieldStats,
    pub dry_season: YieldStats,
    pub transitional: YieldStats,
}

impl SeasonalYieldStats {
    pub fn get(&self, season: Season) -> &YieldStats {
        match season {
            Season::WetSeason => &self.wet_season,
            Season::DrySeason => &self.dry_season,
            Season::Transitional => &self.transitional,
        }
    }

    pub fn get_mut(&mut self, season: Season) -> &mut YieldStats {
        match season {
            Season::WetSeason => &mut self.wet_season,
            Season::DrySeason => &mut self.dry_season,
            Season::Transitional => &mut self.transitional,
        }
    }
}

/// Summary figures over a forecast curve
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub days: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub final_value: f64,
    /// Days whose value was pinned to an edge of the season band
    pub days_at_band_edge: usize,
}

impl ForecastSummary {
    /// Summarize a curve; an empty curve gives all zeros
    pub fn from_points(points: &[ForecastPoint]) -> Self {
        let Some(last) = points.last() else {
            return Self::default();
        };

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut total = 0.0;
        let mut days_at_band_edge = 0;
        for point in points {
            min = min.min(point.predicted_value);
            max = max.max(point.predicted_value);
            total += point.predicted_value;
            if point.optimal.is_on_edge(point.predicted_value) {
                days_at_band_edge += 1;
            }
        }

        Self {
            days: points.len(),
            mean: total / points.len() as f64,
            min,
            max,
            final_value: last.predicted_value,
            days_at_band_edge,
        }
    }
}

/// Everything the dashboard renders for one analysis session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub observation_count: usize,
    pub weighted_average: Option<f64>,
    pub growth_trend: GrowthTrend,
    pub base_growth_rate: f64,
    pub next_value: Option<f64>,
    pub next_seasonal_value: Option<f64>,
    pub seasonal_stats: SeasonalYieldStats,
    pub forecast: Vec<ForecastPoint>,
    pub summary: ForecastSummary,
}
