//! Request and response models for the forecast API

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{AnalysisReport, HarvestRecord, Season, SeasonProfile};
use uuid::Uuid;
use validator::Validate;

/// A raw observation as sent by the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationInput {
    pub value: f64,
    pub timestamp: String,
}

/// Input for analysis and simulation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(max = 50000))]
    #[serde(default)]
    pub observations: Vec<ObservationInput>,
    /// Forecast horizon; non-positive values give an empty forecast
    pub days_ahead: Option<i64>,
    #[validate(range(min = 1, max = 365))]
    pub period: Option<usize>,
    /// Jitter seed for a repeatable forecast
    pub seed: Option<u64>,
    /// First forecast day (defaults to today)
    pub start_date: Option<NaiveDate>,
}

/// Input for seasonal statistics
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StatsRequest {
    #[validate(length(max = 50000))]
    #[serde(default)]
    pub observations: Vec<ObservationInput>,
}

/// Input for per-plot forecasts
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlotForecastRequest {
    #[validate(length(min = 1, max = 50000))]
    pub harvests: Vec<HarvestRecord>,
    pub days_ahead: Option<i64>,
    #[validate(range(min = 1, max = 365))]
    pub period: Option<usize>,
    pub seed: Option<u64>,
    pub start_date: Option<NaiveDate>,
}

/// Query parameters for CSV import
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ImportQuery {
    pub days_ahead: Option<i64>,
    #[validate(range(min = 1, max = 365))]
    pub period: Option<usize>,
    pub seed: Option<u64>,
    pub start_date: Option<NaiveDate>,
}

/// Output format selector
#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>, // "json" or "csv"
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub date: NaiveDate,
}

/// Forecast options shared by every forecasting endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastOptions {
    pub days_ahead: Option<i64>,
    pub period: Option<usize>,
    pub seed: Option<u64>,
    pub start_date: Option<NaiveDate>,
}

impl From<&AnalyzeRequest> for ForecastOptions {
    fn from(request: &AnalyzeRequest) -> Self {
        Self {
            days_ahead: request.days_ahead,
            period: request.period,
            seed: request.seed,
            start_date: request.start_date,
        }
    }
}

impl From<&PlotForecastRequest> for ForecastOptions {
    fn from(request: &PlotForecastRequest) -> Self {
        Self {
            days_ahead: request.days_ahead,
            period: request.period,
            seed: request.seed,
            start_date: request.start_date,
        }
    }
}

impl From<&ImportQuery> for ForecastOptions {
    fn from(query: &ImportQuery) -> Self {
        Self {
            days_ahead: query.days_ahead,
            period: query.period,
            seed: query.seed,
            start_date: query.start_date,
        }
    }
}

/// Forecast for one plot
#[derive(Debug, Clone, Serialize)]
pub struct PlotForecast {
    pub plot_id: Uuid,
    pub harvest_count: usize,
    pub report: AnalysisReport,
}

/// Season of a date with its configured profile
#[derive(Debug, Clone, Serialize)]
pub struct SeasonClassification {
    pub date: NaiveDate,
    pub season: Season,
    pub name: String,
    pub name_th: String,
    pub profile: SeasonProfile,
}
