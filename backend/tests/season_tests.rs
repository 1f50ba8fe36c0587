//! Season classification and input validation tests
//! Verifies Property 6: Season Partition and Property 7: Observation Validation

use chrono::{Datelike, NaiveDate, Timelike};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    normalize_forecast_horizon, parse_timestamp, validate_observation_value, HarvestRecord,
    Season, SeasonTable, YieldAnalysis,
};
use uuid::Uuid;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

// =============================================================================
// Property 6: Season Partition
// Every calendar month belongs to exactly one season
// =============================================================================

mod season_partition {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property 6: Classification depends only on the month
        #[test]
        fn prop_season_depends_on_month(
            year in 2000i32..2100,
            month in 1u32..=12,
            day in 1u32..=28
        ) {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            prop_assert_eq!(Season::of(&date), Season::of(&first));
            prop_assert_eq!(Season::of(&date), Season::from_month0(date.month0()));
        }
    }

    #[test]
    fn month_table() {
        let expected = [
            Season::WetSeason,     // Jan
            Season::WetSeason,     // Feb
            Season::Transitional,  // Mar
            Season::Transitional,  // Apr
            Season::Transitional,  // May
            Season::DrySeason,     // Jun
            Season::DrySeason,     // Jul
            Season::DrySeason,     // Aug
            Season::DrySeason,     // Sep
            Season::Transitional,  // Oct
            Season::WetSeason,     // Nov
            Season::WetSeason,     // Dec
        ];
        for (month0, season) in expected.iter().enumerate() {
            assert_eq!(Season::from_month0(month0 as u32), *season, "month0 {}", month0);
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Season::WetSeason.to_string(), "Wet Season");
        assert_eq!(Season::DrySeason.key(), "drySeason");
        assert!(!Season::Transitional.name_th().is_empty());
    }

    #[test]
    fn default_table_is_valid() {
        let table = SeasonTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.get(Season::WetSeason).weight, 1.2);
        assert_eq!(table.get(Season::DrySeason).optimal.min, 70.0);
        assert_eq!(table.get(Season::Transitional).optimal.max, 100.0);
    }

    #[test]
    fn inverted_band_rejected() {
        let mut table = SeasonTable::default();
        table.transitional.optimal.min = 120.0;
        assert!(table.validate().is_err());
    }
}

// =============================================================================
// Property 7: Observation Validation
// =============================================================================

mod observation_validation {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property 7: Non-negative finite values are accepted unchanged
        #[test]
        fn prop_non_negative_values_accepted(value in 0.0f64..1_000_000.0) {
            prop_assert_eq!(validate_observation_value(value), Ok(value));
        }

        /// Property 7: Negative values are rejected
        #[test]
        fn prop_negative_values_rejected(value in -1_000_000.0f64..-0.001) {
            prop_assert!(validate_observation_value(value).is_err());
        }
    }

    #[test]
    fn non_finite_values_rejected() {
        assert!(validate_observation_value(f64::NAN).is_err());
        assert!(validate_observation_value(f64::INFINITY).is_err());
    }

    #[test]
    fn timestamp_formats() {
        let rfc = parse_timestamp("2024-03-05T10:30:00+07:00").unwrap();
        assert_eq!(rfc.hour(), 3);

        let date_only = parse_timestamp(" 2024-03-05 ").unwrap();
        assert_eq!(date_only.day(), 5);
        assert_eq!(date_only.hour(), 0);

        assert!(parse_timestamp("2024-03-05 10:30:00").is_ok());
        assert!(parse_timestamp("March 5th").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn rejected_observation_leaves_store_unchanged() {
        let mut analysis = YieldAnalysis::new();
        analysis.add_data_point(100.0, "2024-01-01").unwrap();
        assert!(analysis.add_data_point(-5.0, "2024-01-02").is_err());
        assert!(analysis.add_data_point(5.0, "garbage").is_err());
        assert_eq!(analysis.len(), 1);
    }

    #[test]
    fn out_of_order_observations_sorted() {
        let mut analysis = YieldAnalysis::new();
        analysis.add_data_point(3.0, "2024-03-01").unwrap();
        analysis.add_data_point(1.0, "2024-01-01").unwrap();
        analysis.add_data_point(2.0, "2024-02-01").unwrap();

        let values: Vec<f64> = analysis.store().observations().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn forecast_horizon_normalization() {
        assert_eq!(normalize_forecast_horizon(-10, 730), Ok(0));
        assert_eq!(normalize_forecast_horizon(0, 730), Ok(0));
        assert_eq!(normalize_forecast_horizon(90, 730), Ok(90));
        assert!(normalize_forecast_horizon(731, 730).is_err());
    }
}

// =============================================================================
// Harvest Record Conversion Tests
// =============================================================================

mod harvest_records {
    use super::*;

    fn record(weight: &str) -> HarvestRecord {
        HarvestRecord {
            plot_id: Uuid::new_v4(),
            harvest_date: NaiveDate::from_ymd_opt(2024, 12, 10).unwrap(),
            cherry_weight_kg: dec(weight),
        }
    }

    #[test]
    fn harvest_becomes_midnight_observation() {
        let observation = record("152.75").to_observation().unwrap();
        assert_eq!(observation.value, 152.75);
        assert_eq!(observation.timestamp.hour(), 0);
        assert_eq!(observation.season(), Season::WetSeason);
    }

    #[test]
    fn negative_weight_rejected() {
        assert!(record("-1").to_observation().is_err());
    }
}
