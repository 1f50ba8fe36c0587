//! Forecast HTTP handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use shared::{AnalysisReport, SeasonalYieldStats};
use validator::Validate;

use crate::error::AppResult;
use crate::models::{
    AnalyzeRequest, FormatQuery, ImportQuery, PlotForecast, PlotForecastRequest, StatsRequest,
};
use crate::services::{import, ForecastService};
use crate::AppState;

/// Run every estimator and the simulator over the posted observations
pub async fn analyze(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalysisReport>> {
    input.validate()?;
    let service = ForecastService::new(state.config.clone());
    let report = service.analyze(&input.observations, (&input).into())?;
    Ok(Json(report))
}

/// Forecast curve as JSON, or CSV with `?format=csv`
pub async fn simulate(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    Json(input): Json<AnalyzeRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let service = ForecastService::new(state.config.clone());
    let forecast = service.simulate(&input.observations, (&input).into())?;

    if query.format.as_deref() == Some("csv") {
        let csv = import::export_forecast_csv(&forecast)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"yield_forecast.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(forecast).into_response())
    }
}

/// Seasonal yield statistics for the posted observations
pub async fn seasonal_stats(
    State(state): State<AppState>,
    Json(input): Json<StatsRequest>,
) -> AppResult<Json<SeasonalYieldStats>> {
    input.validate()?;
    let service = ForecastService::new(state.config.clone());
    let stats = service.seasonal_stats(&input.observations)?;
    Ok(Json(stats))
}

/// Analyse harvest history uploaded as CSV
pub async fn import_csv(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: String,
) -> AppResult<Json<AnalysisReport>> {
    query.validate()?;
    let observations = import::parse_observations_csv(&body)?;
    tracing::debug!(rows = observations.len(), "Imported observations from CSV");

    let service = ForecastService::new(state.config.clone());
    let report = service.analyze(&observations, (&query).into())?;
    Ok(Json(report))
}

/// Forecast each plot in a batch of harvest records
pub async fn forecast_plots(
    State(state): State<AppState>,
    Json(input): Json<PlotForecastRequest>,
) -> AppResult<Json<Vec<PlotForecast>>> {
    input.validate()?;
    let service = ForecastService::new(state.config.clone());
    let forecasts = service.forecast_plots(&input.harvests, (&input).into())?;
    Ok(Json(forecasts))
}
