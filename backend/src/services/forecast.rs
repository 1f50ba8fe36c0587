//! Forecast service: builds a fresh analysis per request and runs the engine

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use shared::{
    normalize_forecast_horizon, AnalysisReport, ForecastPoint, HarvestRecord, Observation,
    RandomSource, SeasonTable, SeasonalYieldStats, SeededRandom, ThreadRandom, YieldAnalysis,
};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{ForecastOptions, ObservationInput, PlotForecast};

/// Forecast service
#[derive(Clone)]
pub struct ForecastService {
    config: Arc<Config>,
}

impl ForecastService {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// The configured season table
    pub fn season_table(&self) -> AppResult<SeasonTable> {
        self.config
            .season_table()
            .map_err(|e| AppError::Configuration(e.to_string()))
    }

    /// Validate raw observations and load them into a new analysis
    pub fn build_analysis(&self, observations: &[ObservationInput]) -> AppResult<YieldAnalysis> {
        let mut analysis = YieldAnalysis::with_seasons(self.season_table()?)
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        for input in observations {
            analysis.add_data_point(input.value, &input.timestamp)?;
        }
        Ok(analysis)
    }

    /// Full dashboard payload for a set of observations
    pub fn analyze(
        &self,
        observations: &[ObservationInput],
        options: ForecastOptions,
    ) -> AppResult<AnalysisReport> {
        let analysis = self.build_analysis(observations)?;
        self.report(&analysis, options)
    }

    /// Forecast curve only
    pub fn simulate(
        &self,
        observations: &[ObservationInput],
        options: ForecastOptions,
    ) -> AppResult<Vec<ForecastPoint>> {
        let analysis = self.build_analysis(observations)?;
        let days_ahead = self.horizon(options.days_ahead)?;
        let start = Self::start_date(options.start_date);

        let forecast = analysis.simulate_with(start, days_ahead, self.random(options.seed));
        tracing::debug!(
            observations = analysis.len(),
            days_ahead,
            %start,
            "Simulated forecast"
        );
        Ok(forecast)
    }

    /// Seasonal yield statistics only
    pub fn seasonal_stats(&self, observations: &[ObservationInput]) -> AppResult<SeasonalYieldStats> {
        Ok(self.build_analysis(observations)?.seasonal_yield_stats())
    }

    /// One report per plot, in plot id order
    pub fn forecast_plots(
        &self,
        harvests: &[HarvestRecord],
        options: ForecastOptions,
    ) -> AppResult<Vec<PlotForecast>> {
        let mut by_plot: BTreeMap<Uuid, Vec<Observation>> = BTreeMap::new();
        for harvest in harvests {
            by_plot
                .entry(harvest.plot_id)
                .or_default()
                .push(harvest.to_observation()?);
        }

        let seasons = self.season_table()?;
        let mut forecasts = Vec::with_capacity(by_plot.len());
        for (plot_id, observations) in by_plot {
            let harvest_count = observations.len();
            let analysis = YieldAnalysis::from_observations(seasons, observations)?;
            let report = self.report(&analysis, options)?;
            forecasts.push(PlotForecast {
                plot_id,
                harvest_count,
                report,
            });
        }

        tracing::info!(plots = forecasts.len(), harvests = harvests.len(), "Forecasted plots");
        Ok(forecasts)
    }

    fn report(&self, analysis: &YieldAnalysis, options: ForecastOptions) -> AppResult<AnalysisReport> {
        let days_ahead = self.horizon(options.days_ahead)?;
        let period = self.period(options.period)?;
        let start = Self::start_date(options.start_date);

        let report = analysis.report(start, days_ahead, period, self.random(options.seed));
        tracing::info!(
            observations = report.observation_count,
            trend = %report.growth_trend,
            base_growth_rate = report.base_growth_rate,
            days_ahead,
            "Completed yield analysis"
        );
        Ok(report)
    }

    fn horizon(&self, days_ahead: Option<i64>) -> AppResult<usize> {
        let forecast = &self.config.forecast;
        let requested = days_ahead.unwrap_or_else(|| i64::from(forecast.default_days_ahead));
        normalize_forecast_horizon(requested, forecast.max_days_ahead).map_err(|msg| {
            AppError::Validation {
                field: "days_ahead".to_string(),
                message: format!("{} ({} days)", msg, forecast.max_days_ahead),
                message_th: format!(
                    "ระยะเวลาพยากรณ์เกินกว่าที่กำหนด (สูงสุด {} วัน)",
                    forecast.max_days_ahead
                ),
            }
        })
    }

    fn period(&self, period: Option<usize>) -> AppResult<usize> {
        let period = period.unwrap_or(self.config.forecast.window_period);
        shared::validate_window_period(period).map_err(|msg| AppError::Validation {
            field: "period".to_string(),
            message: msg.to_string(),
            message_th: "ขนาดช่วงข้อมูลไม่ถูกต้อง".to_string(),
        })?;
        Ok(period)
    }

    /// Request seed, then configured seed, then a non-deterministic source
    fn random(&self, seed: Option<u64>) -> Box<dyn RandomSource> {
        match seed.or(self.config.forecast.seed) {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(ThreadRandom),
        }
    }

    fn start_date(start: Option<NaiveDate>) -> NaiveDate {
        start.unwrap_or_else(|| Utc::now().date_naive())
    }
}
