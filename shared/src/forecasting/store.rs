//! Time-ordered observation storage

use chrono::{DateTime, Utc};

use crate::error::ForecastError;
use crate::models::Observation;
use crate::validation::{parse_timestamp, validate_observation_value};

/// Append-only collection of observations, always sorted by timestamp
///
/// Observations with equal timestamps keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct ObservationStore {
    observations: Vec<Observation>,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the timestamp and insert the observation
    pub fn add_data_point(&mut self, value: f64, timestamp: &str) -> Result<(), ForecastError> {
        let timestamp = parse_timestamp(timestamp)?;
        self.add_observation(value, timestamp)
    }

    /// Insert an observation with an already-typed timestamp
    pub fn add_observation(
        &mut self,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), ForecastError> {
        let value = validate_observation_value(value)?;
        let index = self
            .observations
            .partition_point(|existing| existing.timestamp <= timestamp);
        self.observations.insert(index, Observation { value, timestamp });
        Ok(())
    }

    /// All observations in chronological order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// The last `count` observations in chronological order (all of them when fewer)
    pub fn recent(&self, count: usize) -> &[Observation] {
        let start = self.observations.len().saturating_sub(count);
        &self.observations[start..]
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(store: &ObservationStore) -> Vec<f64> {
        store.observations().iter().map(|o| o.value).collect()
    }

    #[test]
    fn test_out_of_order_inserts_are_sorted() {
        let mut store = ObservationStore::new();
        store.add_data_point(3.0, "2024-03-01").unwrap();
        store.add_data_point(1.0, "2024-01-01").unwrap();
        store.add_data_point(2.0, "2024-02-01").unwrap();
        store.add_data_point(4.0, "2024-04-01").unwrap();

        assert_eq!(values(&store), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(store
            .observations()
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_equal_timestamps_keep_insertion_order() {
        let mut store = ObservationStore::new();
        store.add_data_point(10.0, "2024-05-05").unwrap();
        store.add_data_point(20.0, "2024-05-05").unwrap();
        store.add_data_point(5.0, "2024-05-01").unwrap();
        store.add_data_point(30.0, "2024-05-05").unwrap();

        assert_eq!(values(&store), vec![5.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_rejected_input_leaves_store_unchanged() {
        let mut store = ObservationStore::new();
        store.add_data_point(10.0, "2024-05-05").unwrap();

        assert!(matches!(
            store.add_data_point(12.0, "not a date"),
            Err(ForecastError::InvalidTimestamp(_))
        ));
        assert!(matches!(
            store.add_data_point(-1.0, "2024-05-06"),
            Err(ForecastError::InvalidValue(_))
        ));
        assert!(store.add_data_point(f64::NAN, "2024-05-06").is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_recent_window() {
        let mut store = ObservationStore::new();
        assert!(store.recent(7).is_empty());
        for day in 1..=10 {
            store
                .add_data_point(day as f64, &format!("2024-01-{:02}", day))
                .unwrap();
        }
        let recent: Vec<f64> = store.recent(3).iter().map(|o| o.value).collect();
        assert_eq!(recent, vec![8.0, 9.0, 10.0]);
        assert_eq!(store.recent(50).len(), 10);
        assert!(store.recent(0).is_empty());
    }
}
