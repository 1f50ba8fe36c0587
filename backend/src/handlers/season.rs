//! Season table handlers

use axum::{
    extract::{Query, State},
    Json,
};
use shared::{Season, SeasonTable};

use crate::error::AppResult;
use crate::models::{ClassifyQuery, SeasonClassification};
use crate::services::ForecastService;
use crate::AppState;

/// Active season table
pub async fn get_season_table(State(state): State<AppState>) -> AppResult<Json<SeasonTable>> {
    let service = ForecastService::new(state.config.clone());
    Ok(Json(service.season_table()?))
}

/// Season and profile for a date
pub async fn classify_date(
    State(state): State<AppState>,
    Query(query): Query<ClassifyQuery>,
) -> AppResult<Json<SeasonClassification>> {
    let service = ForecastService::new(state.config.clone());
    let table = service.season_table()?;
    let season = Season::of(&query.date);

    Ok(Json(SeasonClassification {
        date: query.date,
        season,
        name: season.to_string(),
        name_th: season.name_th().to_string(),
        profile: *table.get(season),
    }))
}
