//! CSV import and export for yield observations and forecasts

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared::{ForecastCsvRow, ForecastPoint};

use crate::error::{AppError, AppResult};
use crate::models::ObservationInput;

/// One CSV row of harvest history
#[derive(Debug, Deserialize)]
struct CsvObservationRow {
    #[serde(alias = "date", alias = "harvest_date")]
    timestamp: String,
    #[serde(alias = "yield", alias = "cherry_weight_kg")]
    value: f64,
}

/// Parse observations from CSV text with a header row
///
/// Expects `timestamp` and `value` columns (`date`/`harvest_date` and
/// `yield`/`cherry_weight_kg` are accepted as aliases). Timestamps are
/// validated later, when the observations enter the engine.
pub fn parse_observations_csv(body: &str) -> AppResult<Vec<ObservationInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(body.as_bytes());

    let mut observations = Vec::new();
    for (index, row) in reader.deserialize::<CsvObservationRow>().enumerate() {
        // Line 1 is the header
        let row = row.map_err(|e| AppError::CsvImport(format!("line {}: {}", index + 2, e)))?;
        observations.push(ObservationInput {
            value: row.value,
            timestamp: row.timestamp,
        });
    }

    Ok(observations)
}

/// Export a forecast curve as CSV
pub fn export_forecast_csv(points: &[ForecastPoint]) -> AppResult<String> {
    let rows: Vec<ForecastCsvRow> = points.iter().map(ForecastCsvRow::from).collect();
    export_to_csv(&rows)
}

/// Export serializable rows as CSV
pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in data {
        wtr.serialize(record).context("CSV serialization error")?;
    }
    let bytes = wtr.into_inner().context("CSV writer error")?;
    let csv_data = String::from_utf8(bytes).context("UTF-8 conversion error")?;
    Ok(csv_data)
}
