//! WebAssembly module for the Coffee Yield Forecast dashboard
//!
//! Provides client-side computation for:
//! - Season classification
//! - Yield analysis reports
//! - Forecast curves
//! - Seasonal yield statistics

use chrono::NaiveDate;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

use shared::{
    normalize_forecast_horizon, RandomSource, SeededRandom, ThreadRandom, YieldAnalysis,
    DEFAULT_WINDOW_PERIOD,
};

/// Largest horizon the browser will simulate
const MAX_DAYS_AHEAD: u32 = 730;

/// Observation as posted by the dashboard
#[derive(Debug, Deserialize)]
struct ObservationJson {
    value: f64,
    timestamp: String,
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    log("yield forecast module loaded");
}

/// Season name for an ISO date (`YYYY-MM-DD`)
#[wasm_bindgen]
pub fn classify_season(iso_date: &str) -> Result<String, JsValue> {
    season_key(iso_date).map_err(|e| JsValue::from_str(&e))
}

/// Full analysis report for a JSON array of `{value, timestamp}` observations
#[wasm_bindgen]
pub fn analyze_yield(observations_json: &str, days_ahead: i32) -> Result<String, JsValue> {
    analyze_json(observations_json, days_ahead, today(), None).map_err(|e| JsValue::from_str(&e))
}

/// Forecast curve only; pass a seed for a repeatable curve
#[wasm_bindgen]
pub fn forecast_yield(
    observations_json: &str,
    days_ahead: i32,
    seed: Option<u64>,
) -> Result<String, JsValue> {
    forecast_json(observations_json, days_ahead, today(), seed).map_err(|e| JsValue::from_str(&e))
}

/// Per-season totals, counts, extremes and averages
#[wasm_bindgen]
pub fn seasonal_yield_stats(observations_json: &str) -> Result<String, JsValue> {
    stats_json(observations_json).map_err(|e| JsValue::from_str(&e))
}

/// Default season weights and optimal bands
#[wasm_bindgen]
pub fn default_season_table() -> String {
    serde_json::to_string(&SeasonTable::default()).unwrap_or_default()
}

// ============================================================================
// Native helpers
// ============================================================================

fn season_key(iso_date: &str) -> Result<String, String> {
    let date = NaiveDate::parse_from_str(iso_date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", iso_date, e))?;
    Ok(Season::of(&date).key().to_string())
}

fn load_analysis(observations_json: &str) -> Result<YieldAnalysis, String> {
    let observations: Vec<ObservationJson> = serde_json::from_str(observations_json)
        .map_err(|e| format!("Invalid observations JSON: {}", e))?;

    let mut analysis = YieldAnalysis::new();
    for observation in &observations {
        analysis
            .add_data_point(observation.value, &observation.timestamp)
            .map_err(|e| e.to_string())?;
    }
    Ok(analysis)
}

fn horizon(days_ahead: i32) -> Result<usize, String> {
    normalize_forecast_horizon(i64::from(days_ahead), MAX_DAYS_AHEAD)
        .map_err(|msg| format!("{} ({} days)", msg, MAX_DAYS_AHEAD))
}

fn random(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}

fn analyze_json(
    observations_json: &str,
    days_ahead: i32,
    start: NaiveDate,
    seed: Option<u64>,
) -> Result<String, String> {
    let analysis = load_analysis(observations_json)?;
    let report = analysis.report(start, horizon(days_ahead)?, DEFAULT_WINDOW_PERIOD, random(seed));
    log(&format!(
        "analysed {} observations, {} forecast days",
        report.observation_count, report.summary.days
    ));
    serde_json::to_string(&report).map_err(|e| e.to_string())
}

fn forecast_json(
    observations_json: &str,
    days_ahead: i32,
    start: NaiveDate,
    seed: Option<u64>,
) -> Result<String, String> {
    let analysis = load_analysis(observations_json)?;
    let forecast = analysis.simulate_with(start, horizon(days_ahead)?, random(seed));
    serde_json::to_string(&forecast).map_err(|e| e.to_string())
}

fn stats_json(observations_json: &str) -> Result<String, String> {
    let analysis = load_analysis(observations_json)?;
    serde_json::to_string(&analysis.seasonal_yield_stats()).map_err(|e| e.to_string())
}

/// Today's date from the browser clock
#[cfg(target_arch = "wasm32")]
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(target_arch = "wasm32")]
fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn log(_message: &str) {}
